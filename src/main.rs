//! employee-directory binary entry point.
//!
//! Parses startup options, opens the employee source, initializes the
//! terminal in raw mode, runs the TUI event loop and restores the terminal
//! state on exit.
//!
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use employee_directory::app::keymap::Keymap;
use employee_directory::app::viewconf::ViewConfig;
use employee_directory::app::{self, AppState, Theme};
use employee_directory::backend::open_source;
use employee_directory::cli::Cli;
use employee_directory::directory::Directory;
use employee_directory::logging;

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_file)?;

    let source = open_source(cli.backend, cli.base_url.as_deref())
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("open employee source")?;
    let mut directory = Directory::new(source);
    match directory.load() {
        Ok(n) => tracing::info!(count = n, "initial load"),
        Err(e) => tracing::error!(error = %e, "initial load failed; starting with an empty table"),
    }

    let view_path = cli.view.to_string_lossy().to_string();
    ViewConfig::load_or_init(&view_path).apply_to(&mut directory);
    let theme = Theme::load_or_init(&cli.theme.to_string_lossy());
    let keymap = Keymap::load_or_init(&cli.keybinds.to_string_lossy());
    let mut state = AppState::with_config(directory, theme, keymap);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(e) = ViewConfig::from_directory(&state.directory).write_file(&view_path) {
        tracing::warn!(path = %view_path, error = %e, "could not save view preferences");
    }

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
