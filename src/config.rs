//! Configuration management for the chomp client

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use crate::error::{ChompError, ChompResult};
use crate::logging::LoggingConfig;

/// Main configuration for the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChompConfig {
    /// Relay connection settings
    pub network: NetworkConfig,
    /// Board size limits
    pub game: GameConfig,
    /// Diagnostic logging
    pub logging: LoggingConfig,
}

/// Network-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Longest accepted protocol line in bytes
    pub max_line_length: usize,
    /// How long to wait for the listener to drain after leaving (milliseconds)
    pub shutdown_grace_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            max_line_length: 4096,
            shutdown_grace_ms: 500,
        }
    }
}

impl NetworkConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

/// Board dimension limits enforced when seat 0 chooses the size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_rows: usize,
    pub min_cols: usize,
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_cols: 2,
            max_rows: 64,
            max_cols: 64,
        }
    }
}

impl GameConfig {
    /// Check a requested board size against the configured limits
    pub fn check_board_size(&self, rows: usize, cols: usize) -> ChompResult<()> {
        let in_range = (self.min_rows..=self.max_rows).contains(&rows)
            && (self.min_cols..=self.max_cols).contains(&cols);
        if in_range {
            Ok(())
        } else {
            Err(ChompError::InvalidBoardSize {
                rows,
                cols,
                min_rows: self.min_rows,
                min_cols: self.min_cols,
                max_rows: self.max_rows,
                max_cols: self.max_cols,
            })
        }
    }
}

impl ChompConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ChompResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ChompError::Configuration {
            message: format!("Failed to read config file: {}", e),
            field: "config_file".to_string(),
        })?;

        let config: ChompConfig = toml::from_str(&content).map_err(|e| ChompError::Configuration {
            message: format!("Failed to parse config file: {}", e),
            field: "config_format".to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> ChompResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ChompError::Configuration {
            message: format!("Failed to serialize config: {}", e),
            field: "config_serialization".to_string(),
        })?;

        fs::write(path, content).map_err(|e| ChompError::Configuration {
            message: format!("Failed to write config file: {}", e),
            field: "config_write".to_string(),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ChompResult<()> {
        if self.network.connect_timeout_secs == 0 {
            return Err(ChompError::Configuration {
                message: "Connection timeout must be greater than 0".to_string(),
                field: "network.connect_timeout_secs".to_string(),
            });
        }

        if self.network.max_line_length == 0 {
            return Err(ChompError::Configuration {
                message: "Max line length must be greater than 0".to_string(),
                field: "network.max_line_length".to_string(),
            });
        }

        // The poisoned square must never be the only legal move.
        if self.game.min_rows < 2 || self.game.min_cols < 2 {
            return Err(ChompError::Configuration {
                message: "Boards must be at least 2x2".to_string(),
                field: "game.min_rows".to_string(),
            });
        }

        if self.game.min_rows > self.game.max_rows || self.game.min_cols > self.game.max_cols {
            return Err(ChompError::Configuration {
                message: "Minimum board size must not exceed the maximum".to_string(),
                field: "game.max_rows".to_string(),
            });
        }

        self.logging.validate()?;

        Ok(())
    }
}
