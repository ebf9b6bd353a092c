//! Demo state: one bar, the active theme and the step the user is on.
//!
//! The app owns the current step and hands the bar a binding to it, so a
//! tap updates the app and the next frame draws a bar built from the new
//! value.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use stepline_engine::{MonospaceMeasure, ProgressBar, RenderContext, RenderTree, TapOutcome};
use stepline_types::{Style, StyleSpec};
use stepline_util::{BarDocument, ConfigError, UserPreferences};
use tracing::{debug, warn};

use crate::ui::{
    theme::{
        LoadedTheme, Theme,
        theme_helpers::{bar_color_scheme, bar_palette},
    },
    widgets::{step_at, terminal_defaults},
};

/// Style for the demo: document fields first, then theme colours, then cell-sized defaults.
pub fn demo_style(document: &StyleSpec, theme: &dyn Theme) -> Style {
    let fallback = terminal_defaults().show_labels(true).interactive(true).palette(bar_palette(theme));
    document.clone().or(fallback).resolve()
}

/// Message shown under the bar after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: String) -> Self {
        Self { text, is_error: false }
    }

    fn error(text: String) -> Self {
        Self { text, is_error: true }
    }
}

pub struct App {
    bar: ProgressBar,
    document_style: StyleSpec,
    pub theme: LoadedTheme,
    preferences: UserPreferences,
    bar_area: Rect,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(document: &BarDocument, theme: LoadedTheme, preferences: UserPreferences) -> Result<Self, ConfigError> {
        let bar = document.to_bar()?;
        let bar = bar.with_style(demo_style(&document.style, theme.theme.as_ref()));
        Ok(Self {
            bar,
            document_style: document.style.clone(),
            theme,
            preferences,
            bar_area: Rect::default(),
            status: None,
            should_quit: false,
        })
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Renders the bar in cell units against the current theme.
    pub fn render_tree(&self) -> RenderTree {
        let context = RenderContext::new(&MonospaceMeasure::CELLS).with_color_scheme(bar_color_scheme(self.theme.theme.as_ref()));
        self.bar.render(&context)
    }

    /// Records where the bar was last drawn so clicks can be mapped back to steps.
    pub fn set_bar_area(&mut self, area: Rect) {
        self.bar_area = area;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::Home => self.jump_to(1),
            KeyCode::End => self.jump_to(self.bar.total_steps()),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let inside = mouse.column >= self.bar_area.x
            && mouse.column < self.bar_area.right()
            && mouse.row >= self.bar_area.y
            && mouse.row < self.bar_area.bottom();
        if !inside {
            return;
        }
        let tree = self.render_tree();
        if let Some(index) = step_at(&tree, mouse.column - self.bar_area.x, mouse.row - self.bar_area.y) {
            self.tap(index);
        }
    }

    /// Taps the 0-based step `index`.
    pub fn tap(&mut self, index: usize) -> TapOutcome {
        let mut binding = self.bar.current_step();
        let mut selected = None;
        let outcome = self.bar.tap(index, &mut binding, |step| selected = Some(step));
        match outcome {
            TapOutcome::Changed(_) => {
                self.bar = self.bar.with_current_step(binding as i64);
                if let Some(step) = selected {
                    debug!(step, "step selected");
                }
                self.status = Some(StatusMessage::info(format!("Selected {}", self.bar.step_accessibility_label(index as isize))));
            }
            TapOutcome::Unchanged => {
                let label = self.bar.step_accessibility_label(index as isize);
                self.status = Some(StatusMessage::info(format!("{label} is already current")));
            }
            TapOutcome::Ignored => {}
        }
        outcome
    }

    fn move_by(&mut self, delta: i64) {
        let target = self.bar.current_step() as i64 + delta;
        self.jump_to(target.clamp(1, self.bar.total_steps() as i64) as usize);
    }

    fn jump_to(&mut self, step: usize) {
        if step != self.bar.current_step() {
            self.bar = self.bar.with_current_step(step as i64);
            self.status = None;
        }
    }

    fn cycle_theme(&mut self) {
        self.theme.cycle();
        let style = demo_style(&self.document_style, self.theme.theme.as_ref());
        self.bar = self.bar.with_style(style);
        match self.preferences.set_preferred_theme(Some(self.theme.definition.id.to_string())) {
            Ok(()) => self.status = Some(StatusMessage::info(format!("Theme: {}", self.theme.definition.label))),
            Err(error) => {
                warn!(error = %error, "failed to persist theme preference");
                let label = self.theme.definition.label;
                self.status = Some(StatusMessage::error(format!("Theme: {label} (not saved: {error})")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use stepline_types::Rgba;

    use super::*;
    use crate::ui::{
        color::to_rgba,
        widgets::render_to_text,
        theme::{ColorCapability, catalog, nord},
    };

    fn app(yaml: &str) -> App {
        let document = BarDocument::from_yaml(yaml).unwrap();
        let theme = LoadedTheme::from_definition(catalog::default_truecolor(), ColorCapability::Truecolor);
        App::new(&document, theme, UserPreferences::ephemeral()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn document_colours_win_over_theme() {
        let app = app("total_steps: 3\nstyle:\n  palette:\n    complete: '#34C759'\n");
        assert_eq!(app.bar().style().palette.complete, Rgba::GREEN);
        assert!(app.bar().style().is_interactive);
        assert!(app.bar().style().show_labels);
    }

    #[test]
    fn arrows_move_within_bounds() {
        let mut app = app("current_step: 1\ntotal_steps: 3\n");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.bar().current_step(), 1);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.bar().current_step(), 3);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.bar().current_step(), 1);
    }

    #[test]
    fn click_on_indicator_selects_step() {
        let mut app = app("current_step: 1\ntotal_steps: 3\n");
        app.set_bar_area(Rect::new(2, 1, 20, 2));
        click(&mut app, 2 + 7, 1);
        assert_eq!(app.bar().current_step(), 2);
        assert_eq!(app.status().map(|status| status.text.as_str()), Some("Selected Step 2"));

        click(&mut app, 2 + 4, 1);
        assert_eq!(app.bar().current_step(), 2, "connector gap is not a step");
        click(&mut app, 0, 0);
        assert_eq!(app.bar().current_step(), 2);
    }

    #[test]
    fn click_on_offset_indicator_glyphs_selects_step() {
        // Four-letter labels centre each 3-cell indicator half a cell in.
        let yaml = "current_step: 2\ntotal_steps: 2\nsteps:\n  - label: Done\n  - label: Next\n";
        let tree = app(yaml).render_tree();
        assert_eq!(render_to_text(&tree, None).lines().next(), Some(" ◖█◗────◖█◗"));

        for column in 1..=3 {
            let mut app = app(yaml);
            app.set_bar_area(Rect::new(0, 0, 20, 2));
            click(&mut app, column, 0);
            assert_eq!(app.bar().current_step(), 1, "column {column} is step 1's glyph");
        }

        let mut app = app(yaml);
        app.set_bar_area(Rect::new(0, 0, 20, 2));
        click(&mut app, 0, 0);
        assert_eq!(app.bar().current_step(), 2, "blank cell before the indicator");
    }

    #[test]
    fn tapping_current_step_changes_nothing() {
        let mut app = app("current_step: 2\ntotal_steps: 3\n");
        assert_eq!(app.tap(1), TapOutcome::Unchanged);
        assert_eq!(app.bar().current_step(), 2);
    }

    #[test]
    fn non_interactive_documents_ignore_taps() {
        let mut app = app("total_steps: 3\nstyle:\n  is_interactive: false\n");
        assert_eq!(app.tap(2), TapOutcome::Ignored);
        assert_eq!(app.bar().current_step(), 1);
    }

    #[test]
    fn theme_cycle_restyles_and_persists() {
        let mut app = app("total_steps: 2\n");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.definition.id, "nord");
        assert_eq!(app.preferences.preferred_theme(), Some("nord"));
        assert_eq!(app.bar().style().palette.complete, to_rgba(nord::ACCENT_BLUE).unwrap());
        assert_eq!(app.status().map(|status| status.text.as_str()), Some("Theme: Nord"));
        assert!(!app.status().unwrap().is_error);
    }

    #[test]
    fn quit_keys() {
        let mut app = app("total_steps: 2\n");
        app.handle_key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!app.should_quit());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
