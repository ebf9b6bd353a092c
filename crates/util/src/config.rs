//! Bar configuration documents.
//!
//! A document describes one bar in JSON or YAML; the format is picked from
//! the file extension. Colours are hex strings or system colour names.
//!
//! ```yaml
//! current_step: 2
//! total_steps: 4
//! style:
//!   direction: horizontal
//!   line_style: { kind: dashed, width: 1 }   # or `none`
//!   show_labels: true
//! steps:
//!   - label: Account
//!     accessibility_hint: Create your account
//!   - label: Profile
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stepline_engine::{ProgressBar, ProgressError};
use stepline_types::{StepSpec, StyleSpec};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON bar document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML bar document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported bar document extension '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedExtension(String),
    #[error(transparent)]
    InvalidBar(#[from] ProgressError),
}

/// Serialized form of a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDocument {
    #[serde(default = "default_current_step")]
    pub current_step: i64,
    pub total_steps: i64,
    #[serde(default)]
    pub style: StyleSpec,
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

fn default_current_step() -> i64 {
    1
}

impl BarDocument {
    /// Loads a document, choosing the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        debug!(path = %path.display(), %extension, "loading bar document");
        match extension.as_str() {
            "json" => Self::from_json(&contents),
            "yaml" | "yml" => Self::from_yaml(&contents),
            other => Err(ConfigError::UnsupportedExtension(other.to_string())),
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Builds the bar, clamping the current step and validating the step count.
    pub fn to_bar(&self) -> Result<ProgressBar, ConfigError> {
        let bar = ProgressBar::new(self.current_step, self.total_steps, self.style.resolve(), self.steps.clone())?;
        Ok(bar)
    }
}

#[cfg(test)]
mod tests {
    use stepline_types::{Direction, LineStyle, Rgba};
    use tempfile::tempdir;

    use super::*;

    const YAML: &str = r##"
current_step: 2
total_steps: 4
style:
  direction: vertical
  palette:
    complete: "#34C759"
    incomplete_connection: gray
  line_style: { kind: dashed, width: 1 }
  show_labels: true
steps:
  - label: Account
    accessibility_hint: Create your account
  - label: Profile
"##;

    #[test]
    fn yaml_document_builds_a_bar() {
        let document = BarDocument::from_yaml(YAML).unwrap();
        let bar = document.to_bar().unwrap();
        assert_eq!(bar.current_step(), 2);
        assert_eq!(bar.total_steps(), 4);
        assert_eq!(bar.style().direction, Direction::Vertical);
        assert_eq!(bar.style().palette.complete, Rgba::GREEN);
        assert_eq!(bar.style().palette.incomplete_connection, Rgba::GRAY);
        assert_eq!(bar.style().line_style, Some(LineStyle::Dashed { width: 1.0 }));
        assert_eq!(bar.step_label(1), Some("Profile"));
        assert_eq!(bar.step_accessibility_hint(0), "Create your account");
        assert_eq!(bar.step_accessibility_label(3), "Step 4");
    }

    #[test]
    fn json_document_defaults_current_step() {
        let document = BarDocument::from_json(r#"{ "total_steps": 3 }"#).unwrap();
        assert_eq!(document.current_step, 1);
        let bar = document.to_bar().unwrap();
        assert_eq!(bar.style(), &stepline_types::Style::standard());
    }

    #[test]
    fn out_of_range_step_is_clamped_and_empty_bar_rejected() {
        let document = BarDocument::from_json(r#"{ "current_step": 9, "total_steps": 3 }"#).unwrap();
        assert_eq!(document.to_bar().unwrap().current_step(), 3);
        let empty = BarDocument::from_json(r#"{ "total_steps": 0 }"#).unwrap();
        assert!(matches!(empty.to_bar(), Err(ConfigError::InvalidBar(ProgressError::NoSteps(0)))));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempdir().unwrap();
        let yaml_path = dir.path().join("bar.yml");
        fs::write(&yaml_path, YAML).unwrap();
        assert_eq!(BarDocument::load(&yaml_path).unwrap().total_steps, 4);

        let json_path = dir.path().join("bar.JSON");
        fs::write(&json_path, r#"{ "total_steps": 2 }"#).unwrap();
        assert_eq!(BarDocument::load(&json_path).unwrap().total_steps, 2);

        let toml_path = dir.path().join("bar.toml");
        fs::write(&toml_path, "total_steps = 2").unwrap();
        assert!(matches!(BarDocument::load(&toml_path), Err(ConfigError::UnsupportedExtension(ext)) if ext == "toml"));
    }

    #[test]
    fn line_style_none_is_explicit() {
        let document = BarDocument::from_yaml("total_steps: 3\nstyle:\n  line_style: none\n").unwrap();
        assert_eq!(document.style.line_style, Some(None));
        assert_eq!(document.to_bar().unwrap().style().line_style, None);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = BarDocument::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(error.to_string().contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn bad_colour_is_a_parse_error() {
        let result = BarDocument::from_yaml("total_steps: 2\nstyle:\n  palette:\n    complete: '#12'\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }
}
