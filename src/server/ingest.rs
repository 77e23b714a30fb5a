use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::observability::metrics::get_metrics;
use crate::server::server::AppState;

static FORWARDED_MSG: &str = "forwarded";
static INVALID_BODY_MSG: &str = "invalid_body";
static FAILED_MSG: &str = "failed";

/// Inbound event handler standing in for the serverless trigger.
///
/// Accepts either a plain JSON event or an HTTP-gateway envelope whose
/// `body` field carries the event as a JSON string or as an object.
pub async fn handle_event(State(state): State<AppState>, body: Bytes) -> Response {
    let metrics = get_metrics().await;
    info!("received event");

    let event: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            error!("could not parse request body as JSON: {}", e);
            metrics
                .ingest_requests
                .with_label_values(&[INVALID_BODY_MSG])
                .inc();
            return reply(
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid JSON in request body" }),
            );
        }
    };

    let event = match unwrap_gateway_envelope(event) {
        Ok(value) => value,
        Err(e) => {
            error!("could not parse event body as JSON: {}", e);
            metrics
                .ingest_requests
                .with_label_values(&[INVALID_BODY_MSG])
                .inc();
            return reply(
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid JSON in request body" }),
            );
        }
    };

    match state.forwarder.forward(&event).await {
        Ok(aep_response) => {
            metrics
                .ingest_requests
                .with_label_values(&[FORWARDED_MSG])
                .inc();
            reply(
                StatusCode::OK,
                json!({
                    "message": "Event successfully forwarded to AEP",
                    "aepResponse": aep_response
                }),
            )
        }
        Err(e) => {
            error!("failed to forward event: {}", e);
            metrics
                .ingest_requests
                .with_label_values(&[FAILED_MSG])
                .inc();
            reply(e.response_status(), json!({ "message": e.response_message() }))
        }
    }
}

/// Unwrap an HTTP-gateway style envelope.
///
/// A non-empty string `body` is parsed as JSON, a non-string `body` is the
/// event itself, a null or empty `body` leaves the envelope untouched.
fn unwrap_gateway_envelope(event: Value) -> Result<Value, serde_json::Error> {
    let body = match event.get("body") {
        Some(value) => value.clone(),
        None => return Ok(event),
    };
    match body {
        Value::String(s) if !s.is_empty() => serde_json::from_str(&s),
        Value::Null | Value::String(_) => Ok(event),
        other => Ok(other),
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}
