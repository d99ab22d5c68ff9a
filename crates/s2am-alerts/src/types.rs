//! Wire types on both sides of the translation.
//!
//! - [`SplunkEvent`]: the payload of a Splunk webhook alert action
//! - [`Alert`]: a postable alert for the Alertmanager v2 API
//! - [`AlertStatus`]: the status carried by every outbound alert

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{AlertError, Result};

/// A webhook notification sent by a Splunk alert action.
///
/// Fields Splunk sends that the translation does not use (`owner`,
/// `server_host`, `results_file`, ...) are ignored during decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplunkEvent {
    /// Search job identifier.
    #[serde(default)]
    pub sid: String,
    /// Name of the saved search that triggered the alert.
    #[serde(default)]
    pub search_name: String,
    /// Splunk app the search belongs to.
    #[serde(default)]
    pub app: String,
    /// Link to the search results in Splunk Web.
    #[serde(default)]
    pub results_link: String,
    /// First result row of the search, as arbitrary key/value pairs.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub result: Map<String, Value>,
}

impl SplunkEvent {
    /// Decodes an event from a raw request body.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::InvalidPayload` if the body is empty or is not a
    /// JSON object of the expected shape.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AlertError::InvalidPayload {
                reason: "empty body".to_string(),
            });
        }

        serde_json::from_slice(body).map_err(|e| AlertError::InvalidPayload {
            reason: e.to_string(),
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Status of an outbound alert.
///
/// Splunk only notifies when a search triggers, so every translated alert is
/// firing; resolution happens through `endsAt` or Alertmanager's resolve
/// timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// The alert is actively firing.
    #[default]
    Firing,
}

impl AlertStatus {
    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Firing => "firing",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An alert in the shape accepted by `POST /api/v2/alerts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Alert status, always firing.
    pub status: AlertStatus,
    /// Identifying labels used by Alertmanager for grouping and routing.
    pub labels: BTreeMap<String, String>,
    /// Descriptive annotations.
    pub annotations: BTreeMap<String, String>,
    /// When the alert started firing.
    pub starts_at: DateTime<Utc>,
    /// When the alert should be considered resolved, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    /// Link back to the system that generated the alert.
    #[serde(rename = "generatorURL")]
    pub generator_url: String,
}

impl Alert {
    /// Returns the `alertname` label, or an empty string if it is missing.
    #[must_use]
    pub fn alertname(&self) -> &str {
        self.labels.get("alertname").map_or("", String::as_str)
    }
}
