//! Game configuration loaded from TOML.

use crate::tui::Theme;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a gridtoe session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Time-units each player gets per turn.
    #[serde(default = "default_turn_seconds")]
    turn_seconds: u32,

    /// Wall-clock milliseconds per time-unit.
    #[serde(default = "default_tick_millis")]
    tick_millis: u64,

    /// Board sizes offered by the size picker.
    #[serde(default = "default_board_sizes")]
    board_sizes: Vec<usize>,

    /// Initial colour theme.
    #[serde(default)]
    theme: Theme,

    /// Where tracing output is written.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_turn_seconds() -> u32 {
    gridtoe_engine::DEFAULT_TURN_UNITS
}

#[instrument]
fn default_tick_millis() -> u64 {
    gridtoe_engine::DEFAULT_TICK.as_millis() as u64
}

#[instrument]
fn default_board_sizes() -> Vec<usize> {
    vec![3, 4, 5]
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("gridtoe.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turn_seconds: default_turn_seconds(),
            tick_millis: default_tick_millis(),
            board_sizes: default_board_sizes(),
            theme: Theme::default(),
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(turn_seconds = config.turn_seconds, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks that every value can drive a playable match.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_seconds < 1 {
            return Err(ConfigError::new("turn_seconds must be at least 1"));
        }
        if self.tick_millis < 1 {
            return Err(ConfigError::new("tick_millis must be at least 1"));
        }
        if self.board_sizes.is_empty() {
            return Err(ConfigError::new("board_sizes must list at least one size"));
        }
        if let Some(size) = self.board_sizes.iter().find(|s| **s < 1) {
            return Err(ConfigError::new(format!(
                "board size {} is invalid, sizes start at 1",
                size
            )));
        }
        Ok(())
    }

    /// Length of one timer unit.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
