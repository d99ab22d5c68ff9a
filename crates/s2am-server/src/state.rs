//! Shared, read-only state for request handlers.

use s2am_alerts::AlertmanagerClient;

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// State shared by every request: configuration and the outbound client.
#[derive(Debug, Clone)]
pub struct RelayState {
    config: ServerConfig,
    client: AlertmanagerClient,
}

impl RelayState {
    /// Create the state, building the Alertmanager client once.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::InvalidConfig` if the Alertmanager URL is invalid.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let client = AlertmanagerClient::new(&config.alertmanager_url)?;
        Ok(Self { config, client })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the Alertmanager client.
    #[must_use]
    pub const fn client(&self) -> &AlertmanagerClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;

    #[test]
    fn builds_client_from_config() {
        let state = RelayState::new(ServerConfig::new("http://am:9093/")).unwrap();

        assert_eq!(state.client().endpoint(), "http://am:9093/api/v2/alerts");
        assert_eq!(state.config().alertmanager_url, "http://am:9093/");
    }

    #[test]
    fn rejects_invalid_url() {
        let err = RelayState::new(ServerConfig::new("not a url")).unwrap_err();

        assert!(matches!(err, ServerError::InvalidConfig(_)));
    }
}
