//! # Stepline Engine
//!
//! Turns a stepped progress bar configuration into a render tree that any
//! host can draw. Everything in this crate is pure: the same [`ProgressBar`]
//! always yields the same [`RenderTree`].
//!
//! ## Usage
//!
//! ```rust
//! use stepline_engine::{MonospaceMeasure, ProgressBar, RenderContext};
//! use stepline_types::{LineStyle, StyleSpec};
//!
//! let bar = ProgressBar::builder(2, 5)
//!     .style(StyleSpec::default().line_style(LineStyle::Dashed { width: 2.0 }).resolve())
//!     .build()?;
//! let tree = bar.render(&RenderContext::new(&MonospaceMeasure::POINTS));
//! assert_eq!(tree.shapes().len(), 5);
//! assert_eq!(bar.progress_percentage(), "40% complete");
//! # Ok::<(), stepline_engine::ProgressError>(())
//! ```
//!
//! ## Architecture
//!
//! - **`config`**: validated, immutable bar configuration
//! - **`classify`**: complete / active / incomplete per step
//! - **`layout`**: first pass, places indicators and labels
//! - **`connector`**: second pass, lines between indicator centres
//! - **`accessibility`**: labels, hints, traits and the percentage string
//! - **`interaction`**: hit testing and tap-to-navigate
//! - **`render`**: folds both passes into a node tree

pub mod accessibility;
pub mod classify;
pub mod config;
pub mod connector;
pub mod interaction;
pub mod layout;
pub mod render;

pub use accessibility::{Accessibility, AccessibilityTraits};
pub use classify::{StepState, classify};
pub use config::{MAX_STEPS, ProgressBar, ProgressBarBuilder, ProgressError};
pub use connector::{Connector, DashPattern, LineCap};
pub use interaction::{StepBinding, TapOutcome, hit_test};
pub use layout::{Layout, MonospaceMeasure, StepBounds, TextMeasure};
pub use render::{GroupRole, Node, RenderContext, RenderTree, ShapeNode, Stroke, TextNode, Transition};
