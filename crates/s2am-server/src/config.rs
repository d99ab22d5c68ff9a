//! Relay server configuration.

use s2am_alerts::{alerts_endpoint, parse_duration, TransformConfig};
use tracing::warn;

use crate::error::{ServerError, ServerResult};
use crate::logging::{LogFormat, LogLevel};

/// Default Alertmanager base URL.
pub const DEFAULT_ALERTMANAGER_URL: &str = "http://localhost:9093";

/// Default listener address.
pub const DEFAULT_BIND_ADDR: &str = "localhost:8080";

/// Path Splunk posts webhook notifications to.
pub const WEBHOOK_PATH: &str = "/splunk-webhook";

/// Configuration for the relay server, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to (`host:port`).
    pub bind_addr: String,
    /// Base URL of the Alertmanager receiving alerts.
    pub alertmanager_url: String,
    /// Minimum log level.
    pub log_level: LogLevel,
    /// Log output format.
    pub log_format: LogFormat,
    /// Translation settings.
    pub transform: TransformConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            alertmanager_url: DEFAULT_ALERTMANAGER_URL.to_string(),
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            transform: TransformConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration targeting the given Alertmanager.
    #[must_use]
    pub fn new(alertmanager_url: impl Into<String>) -> Self {
        Self {
            alertmanager_url: alertmanager_url.into(),
            ..Self::default()
        }
    }

    /// Set the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Set the log level.
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the log format.
    #[must_use]
    pub const fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Set the translation settings.
    #[must_use]
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// Check the configuration before the server starts.
    ///
    /// A bad Alertmanager URL or empty bind address is fatal. An invalid
    /// end-time offset is only logged: requests fail with a client error
    /// until the process is restarted with a valid value.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidConfig` for fatal problems.
    pub fn validate(&self) -> ServerResult<()> {
        if self.bind_addr.trim().is_empty() {
            return Err(ServerError::InvalidConfig(
                "bind address cannot be empty".to_string(),
            ));
        }

        alerts_endpoint(&self.alertmanager_url)?;

        if let Some(offset) = &self.transform.ends_at {
            if let Err(e) = parse_duration(offset) {
                warn!(ends_at = %offset, error = %e, "end-time offset is invalid, webhook requests will be rejected");
            }
        }

        Ok(())
    }
}
