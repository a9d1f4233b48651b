use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gambit_editor::config::AppConfig;
use gambit_editor::core::error::EditorError;
use gambit_editor::core::logging;
use gambit_editor::tui::app::AppState;
use gambit_editor::tui::services::Services;
use ratatui::{backend::CrosstermBackend, Terminal};

#[tokio::main]
async fn main() -> miette::Result<()> {
    if !logging::terminal_capabilities().is_interactive {
        let _log_guard = logging::init();
        log::error!("{} needs an interactive terminal", gambit_editor::NAME);
        return Err(EditorError::Terminal(io::Error::other("stdout is not a terminal")).into());
    }

    let _log_guard = logging::init_tui();
    log::info!("{} v{} starting", gambit_editor::NAME, gambit_editor::VERSION);

    let config = AppConfig::load();
    let services = Services::from_config(&config);
    let mut app = AppState::new(services);

    // Setup terminal
    let mut terminal = setup_terminal().map_err(EditorError::Terminal)?;

    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal before reporting anything
    restore_terminal(&mut terminal).map_err(EditorError::Terminal)?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        return Err(EditorError::Terminal(e).into());
    }

    log::info!("{} exiting", gambit_editor::NAME);
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
