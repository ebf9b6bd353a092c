//! Text exposed to assistive technology.
//!
//! The bar is one combined accessibility container whose label names the
//! position and whose value is the completion percentage. Each indicator is
//! an element with its own label, hint and traits.

use serde::Serialize;

use crate::{ProgressBar, StepState, classify};

/// Traits attached to a single indicator element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccessibilityTraits {
    /// Set on the current step.
    pub selected: bool,
    /// Set on completed steps.
    pub button: bool,
}

impl AccessibilityTraits {
    pub fn for_state(state: StepState) -> Self {
        Self {
            selected: state == StepState::Active,
            button: state == StepState::Complete,
        }
    }
}

/// Accessibility description of one node in the render tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Accessibility {
    /// Children are merged into a single element with this label and value.
    Container { label: String, value: String },
    /// A leaf element; children, if any, are hidden.
    Element {
        label: String,
        hint: String,
        traits: AccessibilityTraits,
    },
}

fn truncated_percentage(current: usize, total: usize) -> u128 {
    (current as u128 * 100) / (total.max(1) as u128)
}

impl ProgressBar {
    pub fn overall_accessibility_label(&self) -> String {
        format!("Progress tracker: Step {} of {}", self.current_step(), self.total_steps())
    }

    /// Completion percentage, truncated toward zero: 2 of 3 reads "66% complete".
    pub fn progress_percentage(&self) -> String {
        let percentage = truncated_percentage(self.current_step(), self.total_steps());
        format!("{percentage}% complete")
    }

    /// Configured accessibility label, or "Step N" for anything unconfigured
    /// or out of range (including negative indices).
    pub fn step_accessibility_label(&self, index: isize) -> String {
        self.step_spec(index)
            .and_then(|spec| spec.accessibility_label.clone())
            .unwrap_or_else(|| format!("Step {}", index + 1))
    }

    pub fn step_accessibility_hint(&self, index: isize) -> String {
        self.step_spec(index)
            .and_then(|spec| spec.accessibility_hint.clone())
            .unwrap_or_default()
    }

    /// Visible label for a step, if one is configured.
    pub fn step_label(&self, index: isize) -> Option<&str> {
        self.step_spec(index).and_then(|spec| spec.label.as_deref())
    }

    pub fn step_traits(&self, index: usize) -> AccessibilityTraits {
        AccessibilityTraits::for_state(classify(index, self.current_step()))
    }

    pub fn container_accessibility(&self) -> Accessibility {
        Accessibility::Container {
            label: self.overall_accessibility_label(),
            value: self.progress_percentage(),
        }
    }

    pub fn step_accessibility(&self, index: usize) -> Accessibility {
        let signed = index as isize;
        Accessibility::Element {
            label: self.step_accessibility_label(signed),
            hint: self.step_accessibility_hint(signed),
            traits: self.step_traits(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use stepline_types::StepSpec;

    use super::*;
    use crate::config::MAX_STEPS;

    fn bar(current: i64, total: i64) -> ProgressBar {
        ProgressBar::builder(current, total).build().unwrap()
    }

    #[test]
    fn overall_label_and_percentage() {
        let bar = bar(2, 3);
        assert_eq!(bar.overall_accessibility_label(), "Progress tracker: Step 2 of 3");
        assert_eq!(bar.progress_percentage(), "66% complete");
    }

    #[test]
    fn percentage_truncates() {
        let cases = [(1, 4, "25% complete"), (2, 4, "50% complete"), (3, 4, "75% complete"), (4, 4, "100% complete"), (2, 3, "66% complete"), (1, 3, "33% complete"), (1, 7, "14% complete")];
        for (current, total, expected) in cases {
            assert_eq!(bar(current, total).progress_percentage(), expected, "{current} of {total}");
        }
    }

    #[test]
    fn percentage_never_overflows() {
        assert_eq!(truncated_percentage(usize::MAX, usize::MAX), 100);
        assert_eq!(truncated_percentage(usize::MAX / 2, usize::MAX), 49);
        assert_eq!(bar(MAX_STEPS, MAX_STEPS).progress_percentage(), "100% complete");
    }

    #[test]
    fn configured_labels_and_hints() {
        let bar = ProgressBar::builder(2, 3)
            .steps([
                StepSpec::default().with_accessibility_label("Starting point").with_accessibility_hint("Begin here"),
                StepSpec::default().with_accessibility_label("Midpoint").with_accessibility_hint("Continue"),
                StepSpec::default().with_accessibility_label("Endpoint").with_accessibility_hint("Complete"),
            ])
            .build()
            .unwrap();
        assert_eq!(bar.step_accessibility_label(0), "Starting point");
        assert_eq!(bar.step_accessibility_label(1), "Midpoint");
        assert_eq!(bar.step_accessibility_label(2), "Endpoint");
        assert_eq!(bar.step_accessibility_hint(0), "Begin here");
        assert_eq!(bar.step_accessibility_hint(1), "Continue");
        assert_eq!(bar.step_accessibility_hint(2), "Complete");
    }

    #[test]
    fn unconfigured_steps_fall_back() {
        let bar = bar(1, 3);
        assert_eq!(bar.step_accessibility_label(0), "Step 1");
        assert_eq!(bar.step_accessibility_label(2), "Step 3");
        assert_eq!(bar.step_accessibility_hint(1), "");
        assert_eq!(bar.step_accessibility_label(-1), "Step 0");
        assert_eq!(bar.step_accessibility_label(3), "Step 4");
        assert_eq!(bar.step_accessibility_hint(-1), "");
        assert_eq!(bar.step_accessibility_hint(3), "");
        assert_eq!(bar.step_label(0), None);
    }

    #[test]
    fn partial_step_configuration() {
        let bar = ProgressBar::builder(1, 3)
            .steps([
                StepSpec::labelled("One").with_accessibility_hint("First hint"),
                StepSpec::default().with_accessibility_label("Second step"),
                StepSpec::labelled("Three")
                    .with_accessibility_label("Third step")
                    .with_accessibility_hint("Last hint"),
            ])
            .build()
            .unwrap();
        assert_eq!(bar.step_label(0), Some("One"));
        assert_eq!(bar.step_label(1), None);
        assert_eq!(bar.step_label(2), Some("Three"));
        assert_eq!(bar.step_accessibility_label(0), "Step 1");
        assert_eq!(bar.step_accessibility_label(1), "Second step");
        assert_eq!(bar.step_accessibility_hint(0), "First hint");
        assert_eq!(bar.step_accessibility_hint(1), "");
        assert_eq!(bar.step_accessibility_hint(2), "Last hint");
    }

    #[test]
    fn traits_follow_step_state() {
        let bar = bar(2, 3);
        assert_eq!(bar.step_traits(0), AccessibilityTraits { selected: false, button: true });
        assert_eq!(bar.step_traits(1), AccessibilityTraits { selected: true, button: false });
        assert_eq!(bar.step_traits(2), AccessibilityTraits::default());
    }
}
