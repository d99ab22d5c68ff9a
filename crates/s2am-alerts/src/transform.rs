//! Translation of a [`SplunkEvent`] into an Alertmanager [`Alert`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::duration::parse_duration;
use crate::error::{AlertError, Result};
use crate::routing::{Route, TransformConfig};
use crate::types::{Alert, AlertStatus, SplunkEvent};

/// Label carrying the saved search name.
pub const ALERTNAME_LABEL: &str = "alertname";
/// Label carrying the Splunk app.
pub const APP_LABEL: &str = "app";
/// Annotation carrying a one-line description.
pub const SUMMARY_ANNOTATION: &str = "summary";
/// Annotation carrying the results link.
pub const LINK_ANNOTATION: &str = "link";

/// Builds an outbound alert from an inbound event received at `received_at`.
///
/// Result-set entries are routed by [`TransformConfig::route`]. The
/// `summary` and `link` annotations are filled in first so a prefixed result
/// key can override them, while `alertname` and `app` are written last and
/// always reflect the event.
///
/// # Errors
///
/// Returns `AlertError::InvalidDuration` if the configured end-time offset
/// cannot be parsed or does not fit after `received_at`.
pub fn transform(
    event: &SplunkEvent,
    config: &TransformConfig,
    received_at: DateTime<Utc>,
) -> Result<Alert> {
    let ends_at = match config.ends_at.as_deref() {
        Some(offset) => Some(end_time(offset, received_at)?),
        None => None,
    };

    let mut labels = BTreeMap::new();
    let mut annotations = BTreeMap::new();

    annotations.insert(
        SUMMARY_ANNOTATION.to_string(),
        format!("Splunk alert {} fired", event.search_name),
    );
    annotations.insert(LINK_ANNOTATION.to_string(), event.results_link.clone());

    for (key, value) in &event.result {
        match config.route(key, value) {
            Route::Label(name) => {
                labels.insert(name.to_string(), string_value(value));
            }
            Route::Annotation(name) => {
                annotations.insert(name.to_string(), string_value(value));
            }
            Route::Dropped => {
                debug!(key = %key, "result field not forwarded");
            }
        }
    }

    labels.insert(ALERTNAME_LABEL.to_string(), event.search_name.clone());
    labels.insert(APP_LABEL.to_string(), event.app.clone());

    Ok(Alert {
        status: AlertStatus::Firing,
        labels,
        annotations,
        starts_at: received_at,
        ends_at,
        generator_url: event.results_link.clone(),
    })
}

fn end_time(offset: &str, starts_at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let duration = parse_duration(offset)?;
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| starts_at.checked_add_signed(d))
        .ok_or_else(|| AlertError::InvalidDuration {
            input: offset.to_string(),
            reason: "end time out of range".to_string(),
        })
}

fn string_value(value: &serde_json::Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}
