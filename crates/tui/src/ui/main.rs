use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};
use stepline_types::Rgba;

use super::{
    color::to_rgba,
    theme::theme_helpers::block,
    widgets::{SteppedBar, draw_hints},
};
use crate::app::App;

/// Renders the demo screen: the bar, its accessibility summary and the hints strip.
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let tree = app.render_tree();
    let inner = {
        let title = format!("Stepline · {}", app.theme.definition.label);
        let outer = block(app.theme.theme.as_ref(), Some(title.as_str()), true);
        let inner = outer.inner(area);
        f.render_widget(outer, area);
        inner
    };

    let (bar_width, bar_height) = SteppedBar::new(&tree).required_size();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(bar_height),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(inner);
    let bar_area = Rect {
        width: bar_width.min(chunks[1].width),
        ..chunks[1]
    };
    app.set_bar_area(bar_area);

    let app = &*app;
    let theme = app.theme.theme.as_ref();
    let background = to_rgba(theme.roles().surface).unwrap_or(Rgba::BLACK);
    f.render_widget(
        SteppedBar::new(&tree).capability(app.theme.capability).background(background),
        bar_area,
    );

    let bar = app.bar();
    let current = bar.current_step() as isize - 1;
    let mut details = vec![Line::from(vec![
        Span::styled(bar.overall_accessibility_label(), theme.text_primary_style()),
        Span::styled("  ·  ", theme.text_muted_style()),
        Span::styled(bar.progress_percentage(), theme.accent_primary_style()),
    ])];
    let mut step_line = vec![
        Span::styled("Current: ", theme.text_muted_style()),
        Span::styled(bar.step_accessibility_label(current), theme.text_secondary_style()),
    ];
    let hint = bar.step_accessibility_hint(current);
    if !hint.is_empty() {
        step_line.push(Span::styled(format!(" ({hint})"), theme.text_muted_style()));
    }
    details.push(Line::from(step_line));
    f.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), chunks[3]);

    if let Some(status) = app.status() {
        let style = if status.is_error { theme.status_error() } else { theme.status_success() };
        f.render_widget(Paragraph::new(Span::styled(status.text.as_str(), style)), chunks[4]);
    }

    draw_hints(f, chunks[5], theme, bar.style().is_interactive);
}
