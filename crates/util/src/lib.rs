//! Configuration loading and preference storage for Stepline.

pub mod config;
pub mod path_processing;
pub mod preferences;

pub use config::{BarDocument, ConfigError};
pub use path_processing::expand_tilde;
pub use preferences::{PreferencesError, UserPreferences};
