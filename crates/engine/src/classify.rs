//! Step-state classification.

use serde::Serialize;
use stepline_types::{Palette, Rgba};

/// Where a step sits relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Complete,
    Active,
    Incomplete,
}

impl StepState {
    pub fn color(&self, palette: &Palette) -> Rgba {
        match self {
            StepState::Complete => palette.complete,
            StepState::Active => palette.active,
            StepState::Incomplete => palette.incomplete,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StepState::Active)
    }
}

/// Classifies the step at 0-based `index` against the 1-based `current_step`.
pub fn classify(index: usize, current_step: usize) -> StepState {
    if index + 1 == current_step {
        StepState::Active
    } else if index < current_step {
        StepState::Complete
    } else {
        StepState::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_active_step() {
        for total in 1..=7 {
            for current in 1..=total {
                let states: Vec<_> = (0..total).map(|index| classify(index, current)).collect();
                assert_eq!(states.iter().filter(|state| state.is_active()).count(), 1);
                for (index, state) in states.iter().enumerate() {
                    let expected = match index.cmp(&(current - 1)) {
                        std::cmp::Ordering::Less => StepState::Complete,
                        std::cmp::Ordering::Equal => StepState::Active,
                        std::cmp::Ordering::Greater => StepState::Incomplete,
                    };
                    assert_eq!(*state, expected, "index {index} current {current}");
                }
            }
        }
    }

    #[test]
    fn state_colours_come_from_palette() {
        let palette = Palette::default();
        assert_eq!(StepState::Complete.color(&palette), palette.complete);
        assert_eq!(StepState::Active.color(&palette), palette.active);
        assert_eq!(StepState::Incomplete.color(&palette), palette.incomplete);
    }
}
