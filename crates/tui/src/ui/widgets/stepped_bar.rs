//! Rasterizes a [`RenderTree`] into terminal cells.
//!
//! Coordinates in the tree are read as cell units, so the tree should come
//! from a render with [`MonospaceMeasure::CELLS`](stepline_engine::MonospaceMeasure::CELLS)
//! and a style sized in cells (see [`terminal_defaults`]). Connectors are
//! drawn first and indicators over them, which hides the part of each line
//! that runs under an indicator.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use stepline_engine::{Connector, LineCap, RenderTree, ShapeNode, TextNode};
use stepline_types::{FontWeight, LineStyle, Rgba, Size, StyleSpec};

use crate::ui::{color::to_color, theme::ColorCapability};

/// Cell-sized defaults; fields set by a bar document take precedence.
pub fn terminal_defaults() -> StyleSpec {
    StyleSpec::default()
        .step_size(Size::new(3.0, 1.0))
        .spacing(3.0)
        .label_spacing(0.0)
        .line_style(LineStyle::Solid { width: 1.0 })
}

/// Widget drawing one rendered bar.
pub struct SteppedBar<'a> {
    tree: &'a RenderTree,
    capability: ColorCapability,
    background: Rgba,
}

impl<'a> SteppedBar<'a> {
    pub fn new(tree: &'a RenderTree) -> Self {
        Self {
            tree,
            capability: ColorCapability::Truecolor,
            background: Rgba::BLACK,
        }
    }

    pub fn capability(mut self, capability: ColorCapability) -> Self {
        self.capability = capability;
        self
    }

    /// Colour that translucent connectors and labels are blended onto.
    pub fn background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Cells needed to show the whole tree.
    pub fn required_size(&self) -> (u16, u16) {
        let Size { width, height } = self.tree.size;
        (to_cells(width), to_cells(height))
    }

    fn draw_connector(&self, connector: &Connector, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(to_color(connector.color, self.background, self.capability));
        let Some((window_start, window_end)) = visible_window(connector, area) else {
            return;
        };
        for (start, end) in connector.dashes_within(window_start, window_end) {
            let horizontal = (end.x - start.x).abs() >= (end.y - start.y).abs();
            let symbol = line_symbol(connector, horizontal);
            if horizontal {
                let row = start.y.floor() as i32;
                for column in covered_cells(start.x, end.x) {
                    put(buf, area, column, row, symbol, style);
                }
            } else {
                let column = start.x.floor() as i32;
                for row in covered_cells(start.y, end.y) {
                    put(buf, area, column, row, symbol, style);
                }
            }
        }
    }

    fn draw_shape(&self, shape: &ShapeNode, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(to_color(shape.fill, shape.underlay, self.capability));
        let columns = span(shape.frame.x, shape.frame.width);
        let rows = span(shape.frame.y, shape.frame.height);
        let (width, height) = (columns.len(), rows.len());
        let capsule = shape.is_capsule();
        for row in clip(&rows, area.height) {
            for column in clip(&columns, area.width) {
                let column_offset = (i64::from(column) - i64::from(columns.start)) as usize;
                let row_offset = (i64::from(row) - i64::from(rows.start)) as usize;
                let symbol = shape_symbol(capsule, column_offset, row_offset, width, height);
                put(buf, area, column, row, symbol, style);
            }
        }
    }

    fn draw_label(&self, label: &TextNode, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default().fg(to_color(label.color, self.background, self.capability));
        if label.font.weight == FontWeight::Bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        let (x, y) = (label.frame.x.round() as i32, label.frame.y.round() as i32);
        let Some((column, row)) = position(area, x, y) else {
            return;
        };
        let max_width = usize::from(area.right().saturating_sub(column));
        buf.set_stringn(column, row, &label.text, max_width, style);
    }
}

impl Widget for SteppedBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        for connector in self.tree.connectors() {
            self.draw_connector(connector, area, buf);
        }
        for shape in self.tree.shapes() {
            self.draw_shape(shape, area, buf);
        }
        for label in self.tree.labels() {
            self.draw_label(label, area, buf);
        }
    }
}

/// Largest text rendering, in cells; taller output is cut off at the bottom.
const MAX_TEXT_CELLS: u32 = 1 << 20;

/// Draws `tree` without colour and returns the rows, trailing blanks trimmed.
pub fn render_to_text(tree: &RenderTree, max_width: Option<u16>) -> String {
    let widget = SteppedBar::new(tree);
    let (width, height) = widget.required_size();
    let width = max_width.map_or(width, |limit| width.min(limit));
    let max_height = MAX_TEXT_CELLS / u32::from(width.max(1));
    let height = u16::try_from(u32::from(height).min(max_height)).unwrap_or(u16::MAX);
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer);

    let mut lines = Vec::with_capacity(usize::from(height));
    for y in 0..height {
        let line: String = (0..width).map(|x| buffer[(x, y)].symbol()).collect();
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Step whose indicator is drawn in cell `(column, row)` of the bar's area.
///
/// Uses the same snapping as the rasterizer, so a click on any drawn glyph
/// finds its step even when the indicator sits at a half-cell offset.
pub fn step_at(tree: &RenderTree, column: u16, row: u16) -> Option<usize> {
    let (column, row) = (i32::from(column), i32::from(row));
    tree.layout
        .steps
        .iter()
        .find(|step| {
            let frame = step.indicator;
            span(frame.x, frame.width).contains(&column) && span(frame.y, frame.height).contains(&row)
        })
        .map(|step| step.index)
}

fn to_cells(extent: f32) -> u16 {
    extent.max(0.0).ceil().min(f32::from(u16::MAX)) as u16
}

/// Distance window along `connector` that lies inside `area`, in tree units.
fn visible_window(connector: &Connector, area: Rect) -> Option<(f32, f32)> {
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    let axes = [
        (connector.from.x, connector.to.x - connector.from.x, f32::from(area.width)),
        (connector.from.y, connector.to.y - connector.from.y, f32::from(area.height)),
    ];
    for (start, delta, limit) in axes {
        if delta == 0.0 {
            if start < 0.0 || start > limit {
                return None;
            }
        } else {
            let (a, b) = (-start / delta, (limit - start) / delta);
            low = low.max(a.min(b));
            high = high.min(a.max(b));
        }
    }
    let length = connector.length();
    (low <= high).then(|| (low * length, high * length))
}

/// Part of `range` inside `0..extent`.
fn clip(range: &std::ops::Range<i32>, extent: u16) -> std::ops::Range<i32> {
    range.start.max(0)..range.end.min(i32::from(extent))
}

/// Cells whose centres fall in `[from, to)`.
fn covered_cells(from: f32, to: f32) -> std::ops::Range<i32> {
    let snap = |value: f32| (value * 1000.0).round() / 1000.0;
    let (low, high) = if from <= to { (snap(from), snap(to)) } else { (snap(to), snap(from)) };
    ((low - 0.5).ceil() as i32)..((high - 0.5).ceil() as i32)
}

/// Cells covered by a frame edge at `start` with length `extent`; never empty for a positive extent.
fn span(start: f32, extent: f32) -> std::ops::Range<i32> {
    let first = start.round() as i32;
    let last = (start + extent).round() as i32;
    if extent > 0.0 && last <= first { first..first.saturating_add(1) } else { first..last }
}

fn position(area: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    let column = area.x.checked_add(u16::try_from(x).ok()?)?;
    let row = area.y.checked_add(u16::try_from(y).ok()?)?;
    (column < area.right() && row < area.bottom()).then_some((column, row))
}

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if let Some(cell) = position(area, x, y).and_then(|position| buf.cell_mut(position)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

fn line_symbol(connector: &Connector, horizontal: bool) -> &'static str {
    let heavy = connector.width >= 2.0;
    match (connector.cap, horizontal, heavy) {
        (LineCap::Round, _, _) => "·",
        (LineCap::Butt, true, false) => "─",
        (LineCap::Butt, true, true) => "━",
        (LineCap::Butt, false, false) => "│",
        (LineCap::Butt, false, true) => "┃",
    }
}

/// Glyph for one cell of an indicator; capsules get rounded ends.
fn shape_symbol(capsule: bool, column: usize, row: usize, width: usize, height: usize) -> &'static str {
    if !capsule {
        return "█";
    }
    let (first_column, last_column) = (column == 0, column + 1 == width);
    let (first_row, last_row) = (row == 0, row + 1 == height);
    match (width, height) {
        (1, 1) => "●",
        (_, 1) if first_column => "◖",
        (_, 1) if last_column => "◗",
        (_, 1) => "█",
        (1, _) if first_row => "▄",
        (1, _) if last_row => "▀",
        (1, _) => "█",
        _ => match (first_row, last_row, first_column, last_column) {
            (true, _, true, _) => "▗",
            (true, _, _, true) => "▖",
            (_, true, true, _) => "▝",
            (_, true, _, true) => "▘",
            _ => "█",
        },
    }
}
