//! Connector pass: line segments between adjacent indicators.
//!
//! Runs after [`crate::layout::compose`] and reads only its output.

use serde::Serialize;
use stepline_types::{LineStyle, Palette, Point, Rgba};

use crate::layout::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
}

/// Upper bound on the runs produced for one connector.
pub const MAX_DASH_RUNS: usize = 1 << 16;

/// Alternating on/off run lengths along the stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashPattern {
    pub on: f32,
    pub off: f32,
}

impl DashPattern {
    pub const DASHED: DashPattern = DashPattern { on: 4.0, off: 5.0 };
    pub const DOTTED: DashPattern = DashPattern { on: 1.0, off: 5.0 };

    pub fn period(&self) -> f32 {
        self.on + self.off
    }
}

/// A styled segment joining indicator `index` to indicator `index + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub index: usize,
    pub from: Point,
    pub to: Point,
    pub width: f32,
    pub color: Rgba,
    pub cap: LineCap,
    /// `None` for a continuous stroke.
    pub dash: Option<DashPattern>,
    /// True when the segment lies entirely before the current step.
    pub completed: bool,
}

impl Connector {
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Splits the stroke into its visible runs.
    pub fn dashes(&self) -> Vec<(Point, Point)> {
        self.dashes_within(0.0, self.length())
    }

    /// Visible runs clipped to the distance window `[start, end]` along the
    /// stroke. At most [`MAX_DASH_RUNS`] runs are returned.
    pub fn dashes_within(&self, start: f32, end: f32) -> Vec<(Point, Point)> {
        let length = self.length();
        let (low, high) = (start.max(0.0), end.min(length));
        let at = |distance: f32| self.from.lerp(self.to, distance / length);
        let Some(pattern) = self.dash else {
            if length <= 0.0 {
                return vec![(self.from, self.to)];
            }
            return if low < high { vec![(at(low), at(high))] } else { Vec::new() };
        };
        let period = pattern.period();
        if length <= 0.0 || period <= 0.0 || low >= high {
            return Vec::new();
        }
        let first = (low / period).floor() as usize;
        let last = (high / period).ceil() as usize;
        (first..last)
            .take(MAX_DASH_RUNS)
            .filter_map(|run| {
                let run_start = run as f32 * period;
                let run_end = (run_start + pattern.on).min(length);
                let (run_start, run_end) = (run_start.max(low), run_end.min(high));
                (run_start < run_end).then(|| (at(run_start), at(run_end)))
            })
            .collect()
    }
}

/// Stroke parameters for a line style.
pub fn stroke_for(line_style: LineStyle) -> (LineCap, Option<DashPattern>) {
    match line_style {
        LineStyle::Solid { .. } => (LineCap::Butt, None),
        LineStyle::Dashed { .. } => (LineCap::Butt, Some(DashPattern::DASHED)),
        LineStyle::Dotted { .. } => (LineCap::Round, Some(DashPattern::DOTTED)),
    }
}

/// Colour of the connector that starts at 0-based `index`.
pub fn connector_color(index: usize, current_step: usize, palette: &Palette) -> Rgba {
    if index + 1 < current_step {
        palette.complete_connection
    } else {
        palette.incomplete_connection
    }
}

/// Builds one connector per adjacent pair, centre to centre.
///
/// Returns nothing when `line_style` is `None` or there is a single step.
pub fn connect(layout: &Layout, line_style: Option<LineStyle>, palette: &Palette, current_step: usize) -> Vec<Connector> {
    let Some(line_style) = line_style else {
        return Vec::new();
    };
    let (cap, dash) = stroke_for(line_style);
    layout
        .steps
        .windows(2)
        .map(|pair| {
            let index = pair[0].index;
            Connector {
                index,
                from: pair[0].indicator.center(),
                to: pair[1].indicator.center(),
                width: line_style.width(),
                color: connector_color(index, current_step, palette),
                cap,
                dash,
                completed: index + 1 < current_step,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use stepline_types::{PaletteSpec, StyleSpec};

    use super::*;
    use crate::{MonospaceMeasure, ProgressBar, layout::compose};

    fn connectors_for(current: i64, total: i64, line_style: Option<LineStyle>) -> Vec<Connector> {
        let mut spec = StyleSpec::default().spacing(4.0).palette(PaletteSpec {
            complete_connection: Some(Rgba::GREEN),
            incomplete_connection: Some(Rgba::RED),
            ..PaletteSpec::default()
        });
        spec.line_style = Some(line_style);
        let bar = ProgressBar::builder(current, total).style(spec.resolve()).build().unwrap();
        let layout = compose(&bar, &MonospaceMeasure::POINTS);
        connect(&layout, bar.style().line_style, &bar.style().palette, bar.current_step())
    }

    #[test]
    fn connects_centres_of_adjacent_indicators() {
        let connectors = connectors_for(1, 3, Some(LineStyle::Solid { width: 2.0 }));
        assert_eq!(connectors.len(), 2);
        assert_eq!(connectors[0].from, Point::new(8.0, 8.0));
        assert_eq!(connectors[0].to, Point::new(28.0, 8.0));
        assert_eq!(connectors[1].from, Point::new(28.0, 8.0));
        assert_eq!(connectors[0].width, 2.0);
        assert_eq!(connectors[0].cap, LineCap::Butt);
        assert!(connectors[0].dash.is_none());
    }

    #[test]
    fn colour_switches_at_current_step() {
        let connectors = connectors_for(3, 5, Some(LineStyle::Solid { width: 1.0 }));
        let colors: Vec<Rgba> = connectors.iter().map(|connector| connector.color).collect();
        assert_eq!(colors, vec![Rgba::GREEN, Rgba::GREEN, Rgba::RED, Rgba::RED]);
        assert!(connectors[1].completed);
        assert!(!connectors[2].completed);
    }

    #[test]
    fn no_connectors_without_line_style_or_with_one_step() {
        assert!(connectors_for(2, 4, None).is_empty());
        assert!(connectors_for(1, 1, Some(LineStyle::Solid { width: 2.0 })).is_empty());
    }

    #[test]
    fn dashed_and_dotted_patterns() {
        let dashed = connectors_for(1, 2, Some(LineStyle::Dashed { width: 3.0 }));
        assert_eq!(dashed[0].dash, Some(DashPattern { on: 4.0, off: 5.0 }));
        assert_eq!(dashed[0].cap, LineCap::Butt);
        let dotted = connectors_for(1, 2, Some(LineStyle::Dotted { width: 1.5 }));
        assert_eq!(dotted[0].dash, Some(DashPattern { on: 1.0, off: 5.0 }));
        assert_eq!(dotted[0].cap, LineCap::Round);
        assert_eq!(dotted[0].width, 1.5);
    }

    #[test]
    fn dashes_split_stroke_into_runs() {
        let connector = Connector {
            index: 0,
            from: Point::new(0.0, 0.0),
            to: Point::new(20.0, 0.0),
            width: 1.0,
            color: Rgba::BLUE,
            cap: LineCap::Butt,
            dash: Some(DashPattern::DASHED),
            completed: false,
        };
        let runs = connector.dashes();
        assert_eq!(
            runs,
            vec![
                (Point::new(0.0, 0.0), Point::new(4.0, 0.0)),
                (Point::new(9.0, 0.0), Point::new(13.0, 0.0)),
                (Point::new(18.0, 0.0), Point::new(20.0, 0.0)),
            ]
        );
        let solid = Connector { dash: None, ..connector };
        assert_eq!(solid.dashes(), vec![(Point::new(0.0, 0.0), Point::new(20.0, 0.0))]);
    }

    #[test]
    fn dash_runs_are_windowed_and_bounded() {
        let connector = Connector {
            index: 0,
            from: Point::new(0.0, 0.0),
            to: Point::new(3.0e8, 0.0),
            width: 1.0,
            color: Rgba::BLUE,
            cap: LineCap::Butt,
            dash: Some(DashPattern::DASHED),
            completed: false,
        };
        assert_eq!(connector.dashes().len(), MAX_DASH_RUNS);
        let xs: Vec<(f32, f32)> = connector
            .dashes_within(2.0, 12.0)
            .iter()
            .map(|(start, end)| (start.x, end.x))
            .collect();
        assert_eq!(xs.len(), 2);
        for ((start, end), (expected_start, expected_end)) in xs.into_iter().zip([(2.0, 4.0), (9.0, 12.0)]) {
            assert!((start - expected_start).abs() < 1e-3, "run starts at {start}");
            assert!((end - expected_end).abs() < 1e-3, "run ends at {end}");
        }
        assert!(connector.dashes_within(5.0, 8.0).is_empty());

        let solid = Connector { dash: None, ..connector };
        assert_eq!(solid.dashes_within(-5.0, 10.0).len(), 1);
        assert!(solid.dashes_within(10.0, 10.0).is_empty());
    }
}
