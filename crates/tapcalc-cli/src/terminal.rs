//! Interactive terminal session

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, layout::Rect, Terminal};
use tapcalc::core::EngineConfig;
use tapcalc::tui::{keypad_area, render, CalculatorApp};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Runs the calculator until the user quits
pub fn run(config: EngineConfig) -> CliResult<()> {
    if !io::stdout().is_terminal() {
        return Err(CliError::terminal("stdout is not a terminal"));
    }

    enable_raw_mode()?;
    let mut terminal = setup_or_restore(open_terminal, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    })?;

    let mut app = CalculatorApp::with_config(config);
    let result = event_loop(&mut terminal, &mut app);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!(display = %app.engine().display_text(), "session ended");
    result
}

fn open_terminal() -> CliResult<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Runs `setup`, calling `restore` before handing back its error
fn setup_or_restore<T>(
    setup: impl FnOnce() -> CliResult<T>,
    restore: impl FnOnce(),
) -> CliResult<T> {
    setup().map_err(|e| {
        restore();
        e
    })
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> CliResult<()> {
    let mut frame_area = Rect::default();

    while !app.should_quit() {
        terminal.draw(|f| {
            frame_area = f.area();
            render(app, f);
        })?;

        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                app.click(keypad_area(frame_area), column, row);
            }
            _ => {}
        }
    }

    Ok(())
}
