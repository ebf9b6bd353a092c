//! Theme styling module for the TUI UI layer.
//!
//! This module defines the Dracula and Nord palettes, an ANSI 256-color
//! fallback, semantic theme roles, and helper builders for Ratatui widgets
//! and bar palettes. Prefer these helpers over hard-coding colors.

pub mod ansi256;
pub mod catalog;
pub mod dracula;
pub mod loader;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use ansi256::Ansi256Theme;
pub use catalog::ThemeDefinition;
pub use dracula::DraculaTheme;
pub use loader::{ColorCapability, LoadedTheme, load};
pub use nord::NordTheme;
pub use roles::{Theme, ThemeRoles};
