//! Hints widget for displaying keyboard shortcuts.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::ui::theme::Theme;

/// Renders the hints strip. Mouse hints only appear when taps change the step.
pub fn draw_hints(frame: &mut Frame, area: Rect, theme: &dyn Theme, interactive: bool) {
    let key = theme.accent_emphasis_style();
    let text = theme.text_muted_style();
    let mut spans = vec![Span::styled("Hints: ", text)];
    if interactive {
        spans.push(Span::styled("Click", key));
        spans.push(Span::styled(" select  ", text));
    }
    spans.extend([
        Span::styled("←/→", key),
        Span::styled(" move  ", text),
        Span::styled("t", key),
        Span::styled(" theme  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ]);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(text), area);
}
