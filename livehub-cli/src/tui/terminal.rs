//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use livehub_core::{Api, HubConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application
///
/// Must be called from inside the tokio runtime: views spawn their
/// requests onto it.
pub fn run(api: Api, config: &HubConfig) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(api, config.api_base());
    app.dashboard.mount();

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // 100ms timeout doubles as the fetch poll interval
        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            if key.kind == KeyEventKind::Press {
                match handle_key(app, key) {
                    HandleResult::Quit => break,
                    HandleResult::Continue => {}
                    HandleResult::Select => app.select_highlighted(),
                    HandleResult::Deselect => app.deselect(),
                    HandleResult::Reload => {
                        debug!("reload requested");
                        app.reload();
                    }
                }
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    // Views abort their in-flight requests when dropped
    Ok(())
}
