//! Layout pass: places every indicator and label along the primary axis.
//!
//! The result is the per-render [`StepBounds`] table that the connector pass
//! and hit testing read. Nothing here is cached between renders.

use serde::Serialize;
use stepline_types::{Direction, LabelFont, Point, Rect, Size};
use unicode_width::UnicodeWidthStr;

use crate::{ProgressBar, StepState, classify};

/// Measures label text for layout.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: &LabelFont) -> Size;
}

/// Fixed-advance text measurement based on display width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    advance: f32,
    line_height: f32,
    font_relative: bool,
}

impl MonospaceMeasure {
    /// Point-based measurement: advance and line height scale with the font size.
    pub const POINTS: MonospaceMeasure = MonospaceMeasure {
        advance: 0.6,
        line_height: 1.2,
        font_relative: true,
    };

    /// Terminal cells: one column per display column, one row per line.
    pub const CELLS: MonospaceMeasure = MonospaceMeasure {
        advance: 1.0,
        line_height: 1.0,
        font_relative: false,
    };
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, font: &LabelFont) -> Size {
        let scale = if self.font_relative { font.size } else { 1.0 };
        let columns = text.width() as f32;
        Size::new(columns * self.advance * scale, self.line_height * scale)
    }
}

/// Where one step landed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepBounds {
    pub index: usize,
    pub state: StepState,
    /// Indicator plus label plus padding.
    pub cell: Rect,
    pub indicator: Rect,
    pub label: Option<Rect>,
}

/// Output of the layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub size: Size,
    pub steps: Vec<StepBounds>,
}

impl Layout {
    pub fn bounds(&self, index: usize) -> Option<&StepBounds> {
        self.steps.get(index)
    }

    /// Returns a copy moved by `offset`, for hosts that place the bar inside a larger area.
    pub fn translated(&self, offset: Point) -> Layout {
        let shift = |rect: Rect| Rect::new(rect.x + offset.x, rect.y + offset.y, rect.width, rect.height);
        Layout {
            size: self.size,
            steps: self
                .steps
                .iter()
                .map(|step| StepBounds {
                    cell: shift(step.cell),
                    indicator: shift(step.indicator),
                    label: step.label.map(shift),
                    ..step.clone()
                })
                .collect(),
        }
    }
}

/// Lays out every step of `bar`.
pub fn compose(bar: &ProgressBar, measure: &dyn TextMeasure) -> Layout {
    let style = bar.style();
    let spacing = style.effective_spacing();
    let mut steps = Vec::with_capacity(bar.total_steps());
    let mut cursor = 0.0_f32;
    let mut cross_extent = 0.0_f32;

    for index in 0..bar.total_steps() {
        let state = classify(index, bar.current_step());
        let indicator_size = if state.is_active() { style.active_step_size } else { style.step_size };
        let label_size = style
            .show_labels
            .then(|| bar.step_label(index as isize))
            .flatten()
            .map(|text| measure.measure(text, &style.label_font));

        let bounds = match style.direction {
            Direction::Horizontal => {
                let label_block = label_size.map_or(0.0, |size| style.label_spacing + size.height);
                let bottom_padding = if style.show_labels { style.label_spacing } else { 0.0 };
                let width = indicator_size.width.max(label_size.map_or(0.0, |size| size.width));
                let cell = Rect::new(cursor, 0.0, width, indicator_size.height + label_block + bottom_padding);
                let indicator = Rect::from_origin_size(Point::new(cursor + (width - indicator_size.width) / 2.0, 0.0), indicator_size);
                let label = label_size.map(|size| {
                    Rect::from_origin_size(
                        Point::new(cursor + (width - size.width) / 2.0, indicator_size.height + style.label_spacing),
                        size,
                    )
                });
                cursor += width;
                cross_extent = cross_extent.max(cell.height);
                StepBounds { index, state, cell, indicator, label }
            }
            Direction::Vertical => {
                let height = indicator_size.height.max(label_size.map_or(0.0, |size| size.height));
                let width = indicator_size.width + label_size.map_or(0.0, |size| style.label_spacing + size.width);
                let cell = Rect::new(0.0, cursor, width, height);
                let indicator = Rect::from_origin_size(Point::new(0.0, cursor + (height - indicator_size.height) / 2.0), indicator_size);
                let label = label_size.map(|size| {
                    Rect::from_origin_size(
                        Point::new(indicator_size.width + style.label_spacing, cursor + (height - size.height) / 2.0),
                        size,
                    )
                });
                cursor += height;
                cross_extent = cross_extent.max(cell.width);
                StepBounds { index, state, cell, indicator, label }
            }
        };
        steps.push(bounds);
        if index + 1 < bar.total_steps() {
            cursor += spacing;
        }
    }

    let size = match style.direction {
        Direction::Horizontal => Size::new(cursor, cross_extent),
        Direction::Vertical => Size::new(cross_extent, cursor),
    };
    tracing::debug!(steps = steps.len(), width = size.width, height = size.height, "composed step layout");
    Layout { size, steps }
}
