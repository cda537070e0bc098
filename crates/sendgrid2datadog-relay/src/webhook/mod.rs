//! SendGrid Event Webhook receiver.
//!
//! Body -> typed events -> one counter point per event, emitted in order.
//! The first failure stops the loop; points already sent stay sent.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::IntoResponse,
};

use sendgrid2datadog_core::error::{RelayError, Result};
use sendgrid2datadog_core::{decode_events, MetricPoint, SendGridEvent};

use crate::app_state::AppState;
use crate::error::ApiError;

pub const CONFIRMATION: &str = "Events was sent to Datadog";

pub async fn receive(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> std::result::Result<impl IntoResponse, ApiError> {
    let body = body.map_err(|rej| {
        if rej.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RelayError::PayloadTooLarge
        } else {
            RelayError::MalformedPayload(rej.body_text())
        }
    })?;

    let events = decode_events(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejecting webhook body");
        e
    })?;

    relay_events(&state, &events).await?;

    Ok((StatusCode::OK, CONFIRMATION))
}

/// Emit one counter per event, sequentially, stopping at the first backend error.
pub async fn relay_events(state: &AppState, events: &[SendGridEvent]) -> Result<()> {
    let prefix = &state.cfg().relay.metric_prefix;
    let tags = &state.cfg().backend.tags;
    let client = state.metrics();

    // Points are built up front so only the backend can cause a partial send.
    let points = events
        .iter()
        .map(|event| Ok(MetricPoint::counter_for(prefix, event)?.with_tags(tags)))
        .collect::<Result<Vec<_>>>()?;

    for (sent, point) in points.iter().enumerate() {
        if let Err(e) = client.emit_counter(point).await {
            tracing::warn!(
                backend = client.backend(),
                metric = %point.name,
                sent,
                total = events.len(),
                error = %e,
                "metric emission failed, aborting remaining events"
            );
            return Err(e);
        }
        tracing::debug!(metric = %point.name, ts = point.unix_secs(), "metric emitted");
    }

    tracing::info!(count = events.len(), backend = client.backend(), "webhook relayed");
    Ok(())
}
