//! # Stepline TUI
//!
//! Draws stepped progress bars in a terminal with Ratatui and hosts the
//! interactive demo.
//!
//! ## Key Features
//!
//! - Rasterizer from the engine's render tree to terminal cells
//! - Dracula, Nord and ANSI 256 themes mapped onto bar palettes
//! - Mouse taps and arrow keys move the current step
//! - Theme choice persisted through user preferences
//!
//! ## Architecture
//!
//! `app` owns the demo state. `ui::widgets::stepped_bar` turns a
//! [`stepline_engine::RenderTree`] into cells, `ui::main` lays out the
//! screen and `ui::runtime` owns the terminal and the event loop.

pub mod app;
pub mod ui;

use anyhow::Result;
use stepline_util::{BarDocument, UserPreferences};
use tracing::warn;

pub use app::{App, StatusMessage, demo_style};
pub use ui::theme::{ColorCapability, LoadedTheme};
pub use ui::widgets::{SteppedBar, render_to_text, step_at, terminal_defaults};

/// Runs the interactive demo for `document`.
///
/// The theme comes from the environment, then the stored preference, then
/// the default for the terminal's color capability. The terminal is restored
/// before this returns, including on error.
///
/// # Errors
///
/// Returns an error when the document describes no steps or when terminal
/// setup or input fails.
pub fn run(document: &BarDocument) -> Result<()> {
    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        warn!(error = %error, "failed to open preferences; theme choices will not be saved");
        UserPreferences::ephemeral()
    });
    let theme = ui::theme::load(preferences.preferred_theme());
    let app = App::new(document, theme, preferences)?;
    ui::runtime::run_app(app)
}
