//! Record review Terminal User Interface (TUI)
//!
//! Shows the loaded records as a table with every cell coloured by its
//! validation state, a tooltip line for the selected cell, a per-record issue
//! popup and CSV export.

pub mod app;
pub mod components;
pub mod ui;

pub use app::{App, AppAction, LoadState};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::info;

use crate::config::Config;

/// Set up the terminal, run the review app until the user quits, and restore
/// the terminal even when the app fails.
pub async fn run_tui(config: Config) -> Result<()> {
    info!("Starting review TUI for {}", config.source);

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
