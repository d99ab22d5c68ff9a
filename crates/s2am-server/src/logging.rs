//! Logger setup.

use std::fmt;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::error::{ServerError, ServerResult};

/// Minimum level of emitted log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Everything, including per-field routing decisions.
    Debug,
    /// Startup and one line per forwarded alert.
    #[default]
    Info,
    /// Rejected requests.
    Warn,
    /// Forwarding failures only.
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format of log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Builds the filter for the given level.
#[must_use]
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.as_str())
}

/// Installs the global subscriber writing to stdout.
///
/// # Errors
///
/// Returns `ServerError::Internal` if a global subscriber is already set.
pub fn init_logging(level: LogLevel, format: LogFormat) -> ServerResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .with_writer(std::io::stdout);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ServerError::Internal(format!("failed to install logger: {e}")))
}
