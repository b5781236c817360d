//! Command-line interface for gridtoe.

use std::path::PathBuf;

use clap::Parser;

use crate::{ConfigError, GameConfig, Theme};

/// Gridtoe - timed N×N tic-tac-toe for two players at one keyboard
#[derive(Parser, Debug)]
#[command(name = "gridtoe")]
#[command(about = "Timed N×N tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it is missing)
    #[arg(short, long, default_value = "gridtoe.toml")]
    pub config: PathBuf,

    /// Start straight into a match on this board size
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Override the per-turn time budget
    #[arg(long)]
    pub turn_seconds: Option<u32>,

    /// Override the starting theme (light or dark)
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Override where logs are written
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be parsed or the merged settings are invalid.
    pub fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = GameConfig::load(&self.config)?;
        if let Some(turn_seconds) = self.turn_seconds {
            config = config.with_turn_seconds(turn_seconds);
        }
        if let Some(theme) = self.theme {
            config = config.with_theme(theme);
        }
        if let Some(log_file) = &self.log_file {
            config = config.with_log_file(log_file.clone());
        }
        if let Some(size) = self.size
            && size == 0
        {
            return Err(ConfigError::new("--size must be at least 1"));
        }
        config.validate()?;
        Ok(config)
    }
}
