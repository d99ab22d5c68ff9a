//! Delivery of translated alerts to Alertmanager.
//!
//! Each alert is posted exactly once to `<base>/api/v2/alerts`, wrapped in a
//! single-element array. There is no retry: any status other than 200 or a
//! transport failure is returned to the caller.

use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

use crate::error::{AlertError, Result};
use crate::types::Alert;

/// Path of the alert ingestion endpoint, relative to the base URL.
pub const ALERTS_PATH: &str = "api/v2/alerts";

/// Client posting alerts to a single Alertmanager instance.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AlertmanagerClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AlertmanagerClient {
    /// Creates a client for the Alertmanager at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: alerts_endpoint(base_url)?,
        })
    }

    /// Returns the full URL alerts are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Posts one alert.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Transport` if the request cannot be completed and
    /// `AlertError::UnexpectedStatus` (with the response body) if Alertmanager
    /// answers with anything other than 200.
    pub async fn send(&self, alert: &Alert) -> Result<()> {
        let payload = [alert];
        debug!(
            url = %self.endpoint,
            payload = %serde_json::to_string(&payload)?,
            "posting alert"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| AlertError::Transport {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(AlertError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            url = %self.endpoint,
            alertname = %alert.alertname(),
            "alert accepted by alertmanager"
        );
        Ok(())
    }
}

/// Builds `<base_url>/api/v2/alerts`, ignoring a trailing slash on the base.
///
/// # Errors
///
/// Returns `AlertError::InvalidUrl` if `base_url` is not an absolute
/// http(s) URL.
pub fn alerts_endpoint(base_url: &str) -> Result<Url> {
    let invalid = |reason: String| AlertError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let trimmed = base_url.trim().trim_end_matches('/');
    let base = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
    }
    if base.query().is_some() || base.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }

    Url::parse(&format!("{trimmed}/{ALERTS_PATH}")).map_err(|e| invalid(e.to_string()))
}
