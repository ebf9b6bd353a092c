//! Runtime: terminal lifecycle and the demo event loop.
//!
//! The loop is synchronous. It draws a frame, then blocks on
//! `crossterm::event::read()` for the next input and routes it to [`App`].
//! Resize events need no handling beyond the redraw that follows them.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use tracing::debug;

use crate::app::App;
use crate::ui::main;

/// Runs the demo until the user quits, restoring the terminal on every exit path.
pub fn run_app(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal().context("failed to prepare the terminal")?;
    let outcome = event_loop(&mut terminal, &mut app);
    cleanup_terminal(&mut terminal).context("failed to restore the terminal")?;
    outcome
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| main::draw(frame, app))?;
        if app.should_quit() {
            debug!("quit requested");
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) => app.handle_key(key_event),
            Event::Mouse(mouse_event) => app.handle_mouse(mouse_event),
            Event::Resize(width, height) => debug!(width, height, "terminal resized"),
            _ => {}
        }
    }
}

/// Enter raw mode and the alternate screen, and build a terminal backend.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
