//! HTTP request handlers for the relay.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use s2am_alerts::{transform, AlertError, SplunkEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ServerResult;
use crate::state::RelayState;

/// Acknowledgment returned once Alertmanager accepted the alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardResponse {
    /// Always `forwarded`.
    pub status: String,
    /// Name of the forwarded alert.
    pub alertname: String,
}

/// Handle POST /splunk-webhook - translate and forward one alert.
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that every malformed payload, including a missing content type, is
/// answered with 400.
pub async fn splunk_webhook(
    State(state): State<Arc<RelayState>>,
    body: Bytes,
) -> ServerResult<Json<ForwardResponse>> {
    let received_at = Utc::now();

    relay(&state, &body, received_at)
        .await
        .map(Json)
        .map_err(|err| {
            if err.is_client_error() {
                warn!(error = %err, "rejected webhook request");
            } else if let AlertError::UnexpectedStatus { status, body } = &err {
                error!(status = *status, body = %body, "alertmanager rejected alert");
            } else {
                error!(error = %err, "failed to forward alert");
            }
            err.into()
        })
}

async fn relay(
    state: &RelayState,
    body: &[u8],
    received_at: chrono::DateTime<Utc>,
) -> Result<ForwardResponse, AlertError> {
    let event = SplunkEvent::from_slice(body)?;
    let alert = transform(&event, &state.config().transform, received_at)?;

    state.client().send(&alert).await?;

    info!(
        alertname = %alert.alertname(),
        sid = %event.sid,
        labels = ?alert.labels,
        annotations = ?alert.annotations,
        "forwarded splunk alert"
    );

    Ok(ForwardResponse {
        status: "forwarded".to_string(),
        alertname: alert.alertname().to_string(),
    })
}
