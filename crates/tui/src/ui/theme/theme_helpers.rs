use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Padding},
};
use stepline_types::{ColorScheme, PaletteSpec};

use super::roles::{Theme, ThemeRoles};
use crate::ui::color::{scheme_for, to_rgba};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .padding(Padding::horizontal(1))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Bar colours drawn from the theme: finished steps take the secondary
/// accent, the current step the primary accent, pending steps the divider.
///
/// Colours set in a bar document still win; merge with [`PaletteSpec::or`].
pub fn bar_palette<T: Theme + ?Sized>(theme: &T) -> PaletteSpec {
    let roles = theme.roles();
    PaletteSpec {
        complete: to_rgba(roles.accent_secondary),
        active: to_rgba(roles.accent_primary),
        incomplete: to_rgba(roles.divider),
        complete_connection: to_rgba(roles.accent_secondary),
        incomplete_connection: to_rgba(roles.divider),
    }
}

/// Colour scheme implied by the panel the bar is drawn on.
pub fn bar_color_scheme<T: Theme + ?Sized>(theme: &T) -> ColorScheme {
    scheme_for(theme.roles().surface)
}
