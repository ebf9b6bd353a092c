//! Value types shared by the Stepline crates.
//!
//! Nothing in here has behaviour beyond construction and defaulting; the
//! engine crate decides what the values mean.

pub mod color;
pub mod geometry;
pub mod style;

pub use color::{ColorParseError, Rgba};
pub use geometry::{Point, Rect, Size};
pub use style::{
    ColorScheme, DEFAULT_LABEL_SPACING, DEFAULT_SPACING, DEFAULT_STEP_SIZE, Direction, FontWeight, LabelFont, LineStyle, Palette,
    PaletteSpec, StepSpec, Style, StyleSpec,
};
