//! Terminal UI for gridtoe.

mod controller;
mod input;
mod screen;
mod screens;
mod theme;
mod ui;

use std::io;
use std::path::Path;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::GameConfig;

pub use controller::{ActiveScreen, ScreenController};
pub use input::{digit_cell, move_cursor};
pub use screen::{Screen, ScreenTransition};
pub use screens::{GameScreen, MenuOption, SizeSelectScreen};
pub use theme::{Palette, Theme};
pub use ui::{LOW_TIME_UNITS, banner_text, board_lines, score_text, status_text};

/// Sends tracing output to `path` so it does not interfere with the TUI.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the TUI until the user quits.
///
/// With `initial_size` the size picker is skipped and a match starts
/// immediately.
#[instrument(skip(config))]
pub async fn run_tui(config: GameConfig, initial_size: Option<usize>) -> Result<()> {
    info!("Starting gridtoe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut controller = ScreenController::new(config);
    let res = controller.run(&mut terminal, initial_size).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res
}
