//! UI rendering module for the demo application.
//!
//! This module provides the screen layout, the bar rasterizer, themes and
//! the terminal runtime.

pub mod color;
pub mod main;
pub mod runtime;
pub mod theme;
pub mod widgets;
