//! Tap-to-navigate for interactive bars.
//!
//! The bar never owns the current step. A tap reports the new step through
//! the caller's callback and writes it into the caller's [`StepBinding`];
//! the caller then builds a new bar for the next render.

use stepline_types::Point;

use crate::{ProgressBar, layout::Layout};

/// Caller-owned storage for the current step.
pub trait StepBinding {
    fn set_step(&mut self, step: usize);
}

impl StepBinding for usize {
    fn set_step(&mut self, step: usize) {
        *self = step;
    }
}

impl StepBinding for std::cell::Cell<usize> {
    fn set_step(&mut self, step: usize) {
        self.set(step);
    }
}

/// What a tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The binding now holds this 1-based step and the callback was invoked.
    Changed(usize),
    /// The tapped step is already current.
    Unchanged,
    /// The bar is not interactive or the index is out of range.
    Ignored,
}

/// Index of the indicator containing `point`, if any.
pub fn hit_test(layout: &Layout, point: Point) -> Option<usize> {
    layout
        .steps
        .iter()
        .find(|step| step.indicator.contains(point))
        .map(|step| step.index)
}

impl ProgressBar {
    /// Handles a tap on the 0-based indicator `index`.
    pub fn tap(&self, index: usize, binding: &mut dyn StepBinding, mut on_change: impl FnMut(usize)) -> TapOutcome {
        if !self.style().is_interactive || index >= self.total_steps() {
            return TapOutcome::Ignored;
        }
        let step = index + 1;
        if step == self.current_step() {
            return TapOutcome::Unchanged;
        }
        tracing::debug!(from = self.current_step(), to = step, "step tapped");
        on_change(step);
        binding.set_step(step);
        TapOutcome::Changed(step)
    }
}

#[cfg(test)]
mod tests {
    use stepline_types::StyleSpec;

    use super::*;
    use crate::{MonospaceMeasure, layout::compose};

    fn interactive(current: i64, total: i64) -> ProgressBar {
        ProgressBar::builder(current, total)
            .style(StyleSpec::default().interactive(true).resolve())
            .build()
            .unwrap()
    }

    #[test]
    fn tap_reports_one_based_step() {
        let bar = interactive(1, 4);
        let mut current = bar.current_step();
        let mut reported = Vec::new();
        let outcome = bar.tap(2, &mut current, |step| reported.push(step));
        assert_eq!(outcome, TapOutcome::Changed(3));
        assert_eq!(current, 3);
        assert_eq!(reported, vec![3]);
    }

    #[test]
    fn tap_on_current_step_is_a_no_op() {
        let bar = interactive(2, 4);
        let mut current = 2_usize;
        let mut calls = 0;
        assert_eq!(bar.tap(1, &mut current, |_| calls += 1), TapOutcome::Unchanged);
        assert_eq!(current, 2);
        assert_eq!(calls, 0);
    }

    #[test]
    fn non_interactive_and_out_of_range_taps_are_ignored() {
        let passive = ProgressBar::builder(1, 3).build().unwrap();
        let mut current = 1_usize;
        assert_eq!(passive.tap(2, &mut current, |_| {}), TapOutcome::Ignored);
        assert_eq!(current, 1);
        assert_eq!(interactive(1, 3).tap(3, &mut current, |_| {}), TapOutcome::Ignored);
    }

    #[test]
    fn cell_binding_is_updated() {
        let bar = interactive(3, 3);
        let mut binding = std::cell::Cell::new(3_usize);
        bar.tap(0, &mut binding, |_| {});
        assert_eq!(binding.get(), 1);
    }

    #[test]
    fn hit_test_finds_indicator_under_point() {
        let bar = ProgressBar::builder(1, 3)
            .style(StyleSpec::default().spacing(4.0).resolve())
            .build()
            .unwrap();
        let layout = compose(&bar, &MonospaceMeasure::POINTS);
        assert_eq!(hit_test(&layout, Point::new(2.0, 2.0)), Some(0));
        assert_eq!(hit_test(&layout, Point::new(21.0, 15.0)), Some(1));
        assert_eq!(hit_test(&layout, Point::new(17.0, 8.0)), None);
        assert_eq!(hit_test(&layout, Point::new(8.0, 30.0)), None);
    }
}
