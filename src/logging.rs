//! Logging configuration and initialization

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use crate::error::{ChompError, ChompResult};

/// Logging output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Human,
    Json,
}

/// Logging output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        // Diagnostics go to stderr so they never split the game prompt.
        Self {
            level: "warn".to_string(),
            format: LogFormat::Human,
            output: LogOutput::Stderr,
        }
    }
}

impl LoggingConfig {
    pub fn parsed_level(&self) -> ChompResult<Level> {
        self.level.parse::<Level>().map_err(|e| ChompError::Configuration {
            message: format!("Invalid log level '{}': {}", self.level, e),
            field: "logging.level".to_string(),
        })
    }

    pub fn validate(&self) -> ChompResult<()> {
        self.parsed_level().map(|_| ())
    }
}

/// Initialize structured logging with the given configuration
pub fn init_logging(config: &LoggingConfig) -> ChompResult<()> {
    let level = config.parsed_level()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer().with_target(true);

            match config.output {
                LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).try_init(),
                LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init(),
            }
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);

            match config.output {
                LogOutput::Stdout => registry.with(fmt_layer.with_writer(std::io::stdout)).try_init(),
                LogOutput::Stderr => registry.with(fmt_layer.with_writer(std::io::stderr)).try_init(),
            }
        }
    };

    installed.map_err(|e| ChompError::Configuration {
        message: format!("Failed to install tracing subscriber: {}", e),
        field: "logging".to_string(),
    })
}
