//! The immutable bar configuration and its validation.

use stepline_types::{StepSpec, Style};
use thiserror::Error;

/// Largest accepted `total_steps`.
pub const MAX_STEPS: i64 = 10_000;

/// Errors raised while constructing a [`ProgressBar`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    /// A bar needs at least one step; `total_steps` was zero or negative.
    #[error("total_steps must be at least 1 (got {0})")]
    NoSteps(i64),
    #[error("total_steps must be at most {MAX_STEPS} (got {0})")]
    TooManySteps(i64),
}

/// A validated stepped progress bar configuration.
///
/// `current_step` is 1-based and always within `1..=total_steps`; values
/// outside that range are clamped on construction rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    current_step: usize,
    total_steps: usize,
    style: Style,
    steps: Vec<StepSpec>,
}

impl ProgressBar {
    /// Builds a bar from raw caller input.
    ///
    /// `steps` may be shorter than `total_steps` (or empty); missing entries
    /// fall back to synthesized defaults.
    pub fn new(current_step: i64, total_steps: i64, style: Style, steps: Vec<StepSpec>) -> Result<Self, ProgressError> {
        if total_steps < 1 {
            return Err(ProgressError::NoSteps(total_steps));
        }
        if total_steps > MAX_STEPS {
            return Err(ProgressError::TooManySteps(total_steps));
        }
        let clamped = current_step.clamp(1, total_steps);
        if clamped != current_step {
            tracing::debug!(current_step, total_steps, clamped, "clamped current step into range");
        }
        Ok(Self {
            current_step: clamped as usize,
            total_steps: total_steps as usize,
            style,
            steps,
        })
    }

    pub fn builder(current_step: i64, total_steps: i64) -> ProgressBarBuilder {
        ProgressBarBuilder {
            current_step,
            total_steps,
            style: Style::standard(),
            steps: Vec::new(),
        }
    }

    /// 1-based index of the current step.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Step spec at a 0-based index, if one was configured.
    pub fn step_spec(&self, index: isize) -> Option<&StepSpec> {
        usize::try_from(index).ok().and_then(|index| self.steps.get(index))
    }

    /// Same configuration moved to another step, clamped like [`ProgressBar::new`].
    pub fn with_current_step(&self, current_step: i64) -> Self {
        let total = self.total_steps as i64;
        Self {
            current_step: current_step.clamp(1, total) as usize,
            ..self.clone()
        }
    }

    /// Same steps and position drawn with another style.
    pub fn with_style(&self, style: Style) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

/// Chained construction for [`ProgressBar`].
#[derive(Debug, Clone)]
pub struct ProgressBarBuilder {
    current_step: i64,
    total_steps: i64,
    style: Style,
    steps: Vec<StepSpec>,
}

impl ProgressBarBuilder {
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = StepSpec>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<ProgressBar, ProgressError> {
        ProgressBar::new(self.current_step, self.total_steps, self.style, self.steps)
    }
}
