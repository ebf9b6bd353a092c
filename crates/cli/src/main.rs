use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stepline_engine::{Accessibility, MonospaceMeasure, ProgressBar, RenderContext, StepState, classify};
use stepline_tui::{render_to_text, terminal_defaults};
use stepline_types::{Direction, LineStyle, StepSpec};
use stepline_util::{BarDocument, expand_tilde};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Command::Render { bar, width, json } => {
            let document = load_document(&bar)?;
            let output = if json { render_json(&document)? } else { render_text(&document, width)? };
            println!("{output}");
        }
        Command::Describe { bar, json } => {
            let document = load_document(&bar)?;
            let progress = document.to_bar()?;
            let output = if json {
                serde_json::to_string_pretty(&AccessibilityReport::from(&progress))?
            } else {
                describe(&progress)
            };
            println!("{output}");
        }
        Command::Demo { bar } => {
            let document = load_document(&bar)?;
            stepline_tui::run(&document)?;
        }
    }
    Ok(())
}

/// Logs go to stderr so they never mix with rendered output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Parser)]
#[command(name = "stepline", version, about = "Render and explore stepped progress bars")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the bar as text, or its render tree as JSON.
    Render {
        #[command(flatten)]
        bar: BarArgs,
        /// Clip the output to this many columns.
        #[arg(long)]
        width: Option<u16>,
        /// Print the render tree instead of drawing it.
        #[arg(long)]
        json: bool,
    },
    /// Print what assistive technology announces for the bar.
    Describe {
        #[command(flatten)]
        bar: BarArgs,
        #[arg(long)]
        json: bool,
    },
    /// Explore the bar interactively (default).
    Demo {
        #[command(flatten)]
        bar: BarArgs,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Demo { bar: BarArgs::default() }
    }
}

/// Options shared by every subcommand; flags override the document.
#[derive(Debug, Clone, Default, Args)]
struct BarArgs {
    /// Bar document (.json, .yaml or .yml).
    #[arg(long, short)]
    config: Option<String>,
    /// Current step, 1-based. Out-of-range values are clamped.
    #[arg(long, allow_negative_numbers = true)]
    current: Option<i64>,
    /// Number of steps.
    #[arg(long, allow_negative_numbers = true)]
    total: Option<i64>,
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,
    /// Connector style between steps.
    #[arg(long, value_enum)]
    line: Option<LineArg>,
    /// Show step labels.
    #[arg(long)]
    labels: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineArg {
    #[value(name = "none")]
    Off,
    Solid,
    Dashed,
    Dotted,
}

/// The bar shown when no document is given.
fn sample_document() -> BarDocument {
    let steps = [
        ("Account", "Create your account"),
        ("Profile", "Tell us about yourself"),
        ("Payment", "Add a payment method"),
        ("Confirm", "Review and finish"),
    ]
    .into_iter()
    .map(|(label, hint)| {
        StepSpec::labelled(label)
            .with_accessibility_label(label)
            .with_accessibility_hint(hint)
    })
    .collect();
    BarDocument {
        current_step: 2,
        total_steps: 4,
        style: Default::default(),
        steps,
    }
}

fn load_document(args: &BarArgs) -> Result<BarDocument> {
    let mut document = match &args.config {
        Some(path) => {
            let path = expand_tilde(path);
            BarDocument::load(&path).with_context(|| format!("failed to load bar document {}", path.display()))?
        }
        None => sample_document(),
    };
    if let Some(current) = args.current {
        document.current_step = current;
    }
    if let Some(total) = args.total {
        document.total_steps = total;
    }
    if let Some(direction) = args.direction {
        document.style.direction = Some(match direction {
            DirectionArg::Horizontal => Direction::Horizontal,
            DirectionArg::Vertical => Direction::Vertical,
        });
    }
    match args.line {
        Some(LineArg::Off) => document.style.line_style = Some(None),
        Some(LineArg::Solid) => document.style.line_style = Some(Some(LineStyle::Solid { width: 1.0 })),
        Some(LineArg::Dashed) => document.style.line_style = Some(Some(LineStyle::Dashed { width: 1.0 })),
        Some(LineArg::Dotted) => document.style.line_style = Some(Some(LineStyle::Dotted { width: 1.0 })),
        None => {}
    }
    if args.labels {
        document.style.show_labels = Some(true);
    }
    debug!(
        current = document.current_step,
        total = document.total_steps,
        "bar document ready"
    );
    Ok(document)
}

fn render_text(document: &BarDocument, width: Option<u16>) -> Result<String> {
    let style = document.style.clone().or(terminal_defaults()).resolve();
    let bar = document.to_bar()?.with_style(style);
    let tree = bar.render(&RenderContext::new(&MonospaceMeasure::CELLS));
    Ok(render_to_text(&tree, width))
}

/// Render tree in points, for hosts that draw it themselves.
fn render_json(document: &BarDocument) -> Result<String> {
    let bar = document.to_bar()?;
    let tree = bar.render(&RenderContext::new(&MonospaceMeasure::POINTS));
    Ok(serde_json::to_string_pretty(&tree)?)
}

#[derive(Debug, Serialize)]
struct AccessibilityReport {
    container: Accessibility,
    steps: Vec<Accessibility>,
}

impl From<&ProgressBar> for AccessibilityReport {
    fn from(bar: &ProgressBar) -> Self {
        Self {
            container: bar.container_accessibility(),
            steps: (0..bar.total_steps()).map(|index| bar.step_accessibility(index)).collect(),
        }
    }
}

fn describe(bar: &ProgressBar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", bar.overall_accessibility_label());
    let _ = writeln!(out, "{}", bar.progress_percentage());
    for index in 0..bar.total_steps() {
        let state = match classify(index, bar.current_step()) {
            StepState::Complete => "complete",
            StepState::Active => "current",
            StepState::Incomplete => "upcoming",
        };
        let traits = bar.step_traits(index);
        let mut line = format!("{:>3}. {} [{state}", index + 1, bar.step_accessibility_label(index as isize));
        if traits.selected {
            line.push_str(", selected");
        }
        if traits.button {
            line.push_str(", button");
        }
        line.push(']');
        let hint = bar.step_accessibility_hint(index as isize);
        if !hint.is_empty() {
            let _ = write!(line, " {hint}");
        }
        let _ = writeln!(out, "{line}");
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_the_sample_document() {
        let cli = Cli::parse_from(["stepline", "render", "--current", "3", "--total", "5", "--line", "dashed"]);
        let Some(Command::Render { bar, .. }) = cli.command else {
            panic!("expected render");
        };
        let document = load_document(&bar).unwrap();
        assert_eq!(document.current_step, 3);
        assert_eq!(document.total_steps, 5);
        assert_eq!(document.style.line_style, Some(Some(LineStyle::Dashed { width: 1.0 })));
    }

    #[test]
    fn negative_current_step_is_accepted_and_clamped() {
        let cli = Cli::parse_from(["stepline", "describe", "--current", "-4"]);
        let Some(Command::Describe { bar, .. }) = cli.command else {
            panic!("expected describe");
        };
        let document = load_document(&bar).unwrap();
        assert_eq!(document.to_bar().unwrap().current_step(), 1);
    }

    #[test]
    fn render_text_draws_the_sample_bar() {
        let text = render_text(&sample_document(), None).unwrap();
        assert_eq!(text, "◖█◗───◖█◗───◖█◗───◖█◗");
    }

    #[test]
    fn line_none_draws_no_connectors() {
        let cli = Cli::parse_from(["stepline", "render", "--line", "none"]);
        let Some(Command::Render { bar, width, .. }) = cli.command else {
            panic!("expected render");
        };
        let document = load_document(&bar).unwrap();
        let text = render_text(&document, width).unwrap();
        assert!(!text.contains('─'), "connectors drawn: {text}");
        assert_eq!(text.matches('█').count(), 4);
    }

    #[test]
    fn describe_lists_every_step() {
        let bar = sample_document().to_bar().unwrap();
        let text = describe(&bar);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Progress tracker: Step 2 of 4");
        assert_eq!(lines[1], "50% complete");
        assert_eq!(lines[2], "  1. Account [complete, button] Create your account");
        assert_eq!(lines[3], "  2. Profile [current, selected] Tell us about yourself");
        assert_eq!(lines[5], "  4. Confirm [upcoming] Review and finish");
    }

    #[test]
    fn zero_steps_is_an_error() {
        let mut document = sample_document();
        document.total_steps = 0;
        assert!(render_text(&document, None).is_err());
    }

    #[test]
    fn accessibility_report_serializes() {
        let bar = sample_document().to_bar().unwrap();
        let value = serde_json::to_value(AccessibilityReport::from(&bar)).unwrap();
        assert_eq!(value["container"]["value"], "50% complete");
        assert_eq!(value["steps"].as_array().map(Vec::len), Some(4));
    }
}
