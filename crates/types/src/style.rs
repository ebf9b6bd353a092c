//! Appearance configuration for the stepped progress bar.
//!
//! Every type here has a resolved form used by the engine and, where a value
//! is derived from another one, a `*Spec` form whose fields are all optional.
//! Specs are what configuration documents deserialize into; `resolve` fills
//! in the derived defaults.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Rgba, Size};

/// Gap between step cells when no spacing is configured.
pub const DEFAULT_SPACING: f32 = 8.0;
/// Gap between an indicator and its label.
pub const DEFAULT_LABEL_SPACING: f32 = 4.0;
/// Default indicator size.
pub const DEFAULT_STEP_SIZE: Size = Size::new(16.0, 16.0);
/// Opacity applied to the complete colour when no active colour is given.
pub const ACTIVE_OPACITY: f32 = 0.6;
/// Opacity applied to the default incomplete gray.
pub const INCOMPLETE_OPACITY: f32 = 0.3;

/// Primary axis along which steps are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Light or dark host appearance; picks the underlay painted beneath fills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn underlay(&self) -> Rgba {
        match self {
            ColorScheme::Light => Rgba::WHITE,
            ColorScheme::Dark => Rgba::BLACK,
        }
    }
}

/// Style of the connectors drawn between adjacent indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LineStyle {
    Solid { width: f32 },
    Dashed { width: f32 },
    Dotted { width: f32 },
}

impl LineStyle {
    pub fn width(&self) -> f32 {
        match *self {
            LineStyle::Solid { width } | LineStyle::Dashed { width } | LineStyle::Dotted { width } => width,
        }
    }
}

/// Serde form of [`StyleSpec::line_style`].
///
/// A missing field leaves the setting open (`None`), `none` or `null` turns
/// connectors off (`Some(None)`), and a tagged line style turns them on.
mod line_setting {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Off {
        None,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Null(()),
        Off(Off),
        Line(LineStyle),
    }

    pub fn serialize<S: Serializer>(value: &Option<Option<LineStyle>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(Some(line_style)) => line_style.serialize(serializer),
            Some(None) => serializer.serialize_str("none"),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<LineStyle>>, D::Error> {
        Ok(Some(match Repr::deserialize(deserializer)? {
            Repr::Null(()) | Repr::Off(Off::None) => None,
            Repr::Line(line_style) => Some(line_style),
        }))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font used for visible step labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelFont {
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
}

impl LabelFont {
    pub const CAPTION: LabelFont = LabelFont::regular(12.0);
    pub const FOOTNOTE: LabelFont = LabelFont::regular(13.0);
    pub const BODY: LabelFont = LabelFont::regular(17.0);
    pub const HEADLINE: LabelFont = LabelFont::bold(17.0);
    pub const TITLE: LabelFont = LabelFont::regular(28.0);

    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }

    pub fn with_weight(self, weight: FontWeight) -> Self {
        Self { weight, ..self }
    }
}

impl Default for LabelFont {
    fn default() -> Self {
        Self::CAPTION
    }
}

/// The five semantic colours of the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Steps before the current one.
    pub complete: Rgba,
    /// The current step.
    pub active: Rgba,
    /// Steps after the current one.
    pub incomplete: Rgba,
    /// Connectors that lie entirely before the current step.
    pub complete_connection: Rgba,
    /// All other connectors.
    pub incomplete_connection: Rgba,
}

impl Palette {
    /// Builds a palette, deriving any colour left as `None`.
    ///
    /// `active` falls back to `complete` at 60% opacity and the connection
    /// colours mirror `complete` and `incomplete`.
    pub fn new(
        complete: Rgba,
        active: Option<Rgba>,
        incomplete: Rgba,
        complete_connection: Option<Rgba>,
        incomplete_connection: Option<Rgba>,
    ) -> Self {
        Self {
            complete,
            active: active.unwrap_or_else(|| complete.opacity(ACTIVE_OPACITY)),
            incomplete,
            complete_connection: complete_connection.unwrap_or(complete),
            incomplete_connection: incomplete_connection.unwrap_or(incomplete),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        PaletteSpec::default().resolve()
    }
}

/// Partially specified palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSpec {
    pub complete: Option<Rgba>,
    pub active: Option<Rgba>,
    pub incomplete: Option<Rgba>,
    pub complete_connection: Option<Rgba>,
    pub incomplete_connection: Option<Rgba>,
}

impl PaletteSpec {
    /// Fields set here win; unset fields come from `fallback`.
    pub fn or(self, fallback: PaletteSpec) -> PaletteSpec {
        PaletteSpec {
            complete: self.complete.or(fallback.complete),
            active: self.active.or(fallback.active),
            incomplete: self.incomplete.or(fallback.incomplete),
            complete_connection: self.complete_connection.or(fallback.complete_connection),
            incomplete_connection: self.incomplete_connection.or(fallback.incomplete_connection),
        }
    }

    pub fn resolve(&self) -> Palette {
        Palette::new(
            self.complete.unwrap_or(Rgba::BLUE),
            self.active,
            self.incomplete.unwrap_or_else(|| Rgba::GRAY.opacity(INCOMPLETE_OPACITY)),
            self.complete_connection,
            self.incomplete_connection,
        )
    }
}

/// Per-step label and accessibility text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSpec {
    /// Text drawn next to the indicator when labels are shown.
    pub label: Option<String>,
    /// Spoken description replacing the default "Step N".
    pub accessibility_label: Option<String>,
    /// Spoken hint about what the step is for.
    pub accessibility_hint: Option<String>,
}

impl StepSpec {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_accessibility_label(mut self, text: impl Into<String>) -> Self {
        self.accessibility_label = Some(text.into());
        self
    }

    pub fn with_accessibility_hint(mut self, text: impl Into<String>) -> Self {
        self.accessibility_hint = Some(text.into());
        self
    }
}

/// Fully resolved appearance of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub direction: Direction,
    pub palette: Palette,
    pub step_size: Size,
    /// Size of the indicator for the current step.
    pub active_step_size: Size,
    /// Gap between step cells; `None` uses [`DEFAULT_SPACING`].
    pub spacing: Option<f32>,
    pub corner_radius: f32,
    pub show_labels: bool,
    pub label_font: LabelFont,
    pub label_spacing: f32,
    /// `None` draws no connectors.
    pub line_style: Option<LineStyle>,
    /// Border width of each indicator; `None` draws no border.
    pub stroke_width: Option<f32>,
    pub is_interactive: bool,
}

impl Style {
    /// The stock appearance: small circles, no connectors, no labels.
    pub fn standard() -> Self {
        StyleSpec::default().resolve()
    }

    pub fn effective_spacing(&self) -> f32 {
        self.spacing.unwrap_or(DEFAULT_SPACING)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::standard()
    }
}

/// Partially specified style; chain the setters then call [`StyleSpec::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    pub direction: Option<Direction>,
    pub palette: PaletteSpec,
    pub step_size: Option<Size>,
    pub active_step_size: Option<Size>,
    pub spacing: Option<f32>,
    pub corner_radius: Option<f32>,
    pub show_labels: Option<bool>,
    pub label_font: Option<LabelFont>,
    pub label_spacing: Option<f32>,
    /// `Some(None)` turns connectors off even when a fallback would set them.
    #[serde(with = "line_setting", skip_serializing_if = "Option::is_none")]
    pub line_style: Option<Option<LineStyle>>,
    pub stroke_width: Option<f32>,
    pub is_interactive: Option<bool>,
}

impl StyleSpec {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn palette(mut self, palette: PaletteSpec) -> Self {
        self.palette = palette;
        self
    }

    pub fn step_size(mut self, size: Size) -> Self {
        self.step_size = Some(size);
        self
    }

    pub fn active_step_size(mut self, size: Size) -> Self {
        self.active_step_size = Some(size);
        self
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    pub fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = Some(show);
        self
    }

    pub fn label_font(mut self, font: LabelFont) -> Self {
        self.label_font = Some(font);
        self
    }

    pub fn label_spacing(mut self, spacing: f32) -> Self {
        self.label_spacing = Some(spacing);
        self
    }

    pub fn line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = Some(Some(line_style));
        self
    }

    pub fn no_line_style(mut self) -> Self {
        self.line_style = Some(None);
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.is_interactive = Some(interactive);
        self
    }

    /// Fields set here win; unset fields come from `fallback`.
    pub fn or(self, fallback: StyleSpec) -> StyleSpec {
        StyleSpec {
            direction: self.direction.or(fallback.direction),
            palette: self.palette.or(fallback.palette),
            step_size: self.step_size.or(fallback.step_size),
            active_step_size: self.active_step_size.or(fallback.active_step_size),
            spacing: self.spacing.or(fallback.spacing),
            corner_radius: self.corner_radius.or(fallback.corner_radius),
            show_labels: self.show_labels.or(fallback.show_labels),
            label_font: self.label_font.or(fallback.label_font),
            label_spacing: self.label_spacing.or(fallback.label_spacing),
            line_style: self.line_style.or(fallback.line_style),
            stroke_width: self.stroke_width.or(fallback.stroke_width),
            is_interactive: self.is_interactive.or(fallback.is_interactive),
        }
    }

    /// Fills unset fields. The corner radius defaults to half the shorter
    /// side of `step_size`, which turns square steps into circles and
    /// oblong ones into pills.
    pub fn resolve(&self) -> Style {
        let step_size = self.step_size.unwrap_or(DEFAULT_STEP_SIZE);
        Style {
            direction: self.direction.unwrap_or_default(),
            palette: self.palette.resolve(),
            step_size,
            active_step_size: self.active_step_size.unwrap_or(step_size),
            spacing: self.spacing,
            corner_radius: self.corner_radius.unwrap_or(step_size.min_side() / 2.0),
            show_labels: self.show_labels.unwrap_or(false),
            label_font: self.label_font.unwrap_or_default(),
            label_spacing: self.label_spacing.unwrap_or(DEFAULT_LABEL_SPACING),
            line_style: self.line_style.flatten(),
            stroke_width: self.stroke_width,
            is_interactive: self.is_interactive.unwrap_or(false),
        }
    }
}
