//! Render tree: the value description a host renderer draws.
//!
//! [`ProgressBar::render`] runs the layout pass, then the connector pass over
//! its output, and folds both into a tree of [`Node`]s. The tree is plain
//! data; building it twice from the same bar yields equal trees.

use serde::Serialize;
use stepline_types::{ColorScheme, LabelFont, Rect, Rgba, Size};

use crate::{
    Accessibility, ProgressBar, StepState,
    connector::{Connector, connect},
    layout::{Layout, TextMeasure, compose},
};

/// Response time of the spring applied to size and opacity changes.
pub const SPRING_RESPONSE_SECONDS: f32 = 0.3;

/// Host environment for one render.
pub struct RenderContext<'a> {
    pub color_scheme: ColorScheme,
    pub measure: &'a dyn TextMeasure,
}

impl<'a> RenderContext<'a> {
    pub fn new(measure: &'a dyn TextMeasure) -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            measure,
        }
    }

    pub fn with_color_scheme(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// Animation hint: interpolate when `value` changes between renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub response_seconds: f32,
    pub value: usize,
}

/// A step indicator: rounded rectangle drawn over an opaque underlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeNode {
    pub index: usize,
    pub state: StepState,
    pub frame: Rect,
    pub corner_radius: f32,
    pub underlay: Rgba,
    pub fill: Rgba,
    pub stroke: Option<Stroke>,
    pub transition: Transition,
    pub accessibility: Accessibility,
}

impl ShapeNode {
    /// True when the corner radius rounds the whole shorter side (circle or pill).
    pub fn is_capsule(&self) -> bool {
        self.corner_radius * 2.0 >= self.frame.width.min(self.frame.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub index: usize,
    pub frame: Rect,
    pub text: String,
    pub font: LabelFont,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    ProgressBar,
    Connectors,
    Step(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Group {
        role: GroupRole,
        frame: Rect,
        accessibility: Option<Accessibility>,
        children: Vec<Node>,
    },
    Shape(ShapeNode),
    Text(TextNode),
    Line(Connector),
}

impl Node {
    /// This node and everything below it, parents before children.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut nodes = vec![self];
        if let Node::Group { children, .. } = self {
            for child in children {
                nodes.extend(child.descendants());
            }
        }
        nodes
    }
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub size: Size,
    pub root: Node,
    /// Step bounds from the layout pass, kept for hit testing.
    #[serde(skip)]
    pub layout: Layout,
}

impl RenderTree {
    pub fn shapes(&self) -> Vec<&ShapeNode> {
        self.root
            .descendants()
            .into_iter()
            .filter_map(|node| match node {
                Node::Shape(shape) => Some(shape),
                _ => None,
            })
            .collect()
    }

    pub fn labels(&self) -> Vec<&TextNode> {
        self.root
            .descendants()
            .into_iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn connectors(&self) -> Vec<&Connector> {
        self.root
            .descendants()
            .into_iter()
            .filter_map(|node| match node {
                Node::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl ProgressBar {
    pub fn render(&self, context: &RenderContext<'_>) -> RenderTree {
        let style = self.style();
        let layout = compose(self, context.measure);
        let connectors = connect(&layout, style.line_style, &style.palette, self.current_step());
        let bounds = Rect::from_origin_size(Default::default(), layout.size);

        let mut children = Vec::with_capacity(layout.steps.len() + 1);
        if !connectors.is_empty() {
            children.push(Node::Group {
                role: GroupRole::Connectors,
                frame: bounds,
                accessibility: None,
                children: connectors.into_iter().map(Node::Line).collect(),
            });
        }

        for step in &layout.steps {
            let fill = step.state.color(&style.palette);
            let mut step_children = vec![Node::Shape(ShapeNode {
                index: step.index,
                state: step.state,
                frame: step.indicator,
                corner_radius: style.corner_radius,
                underlay: context.color_scheme.underlay(),
                fill,
                stroke: style.stroke_width.map(|width| Stroke { color: fill, width }),
                transition: Transition {
                    response_seconds: SPRING_RESPONSE_SECONDS,
                    value: self.current_step(),
                },
                accessibility: self.step_accessibility(step.index),
            })];
            if let (Some(frame), Some(text)) = (step.label, self.step_label(step.index as isize)) {
                step_children.push(Node::Text(TextNode {
                    index: step.index,
                    frame,
                    text: text.to_string(),
                    font: style.label_font,
                    color: style.palette.complete,
                }));
            }
            children.push(Node::Group {
                role: GroupRole::Step(step.index),
                frame: step.cell,
                accessibility: None,
                children: step_children,
            });
        }

        RenderTree {
            size: layout.size,
            root: Node::Group {
                role: GroupRole::ProgressBar,
                frame: bounds,
                accessibility: Some(self.container_accessibility()),
                children,
            },
            layout,
        }
    }
}
