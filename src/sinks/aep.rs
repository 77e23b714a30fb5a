use std::sync::Arc;

use http::StatusCode;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::cache::token_cache::TokenCache;
use crate::config::credentials::Credentials;
use crate::error::RelayError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::{EXPIRED_TOKEN_ERROR_TYPE, HEADER_FLOW_ID, HEADER_SANDBOX_NAME};

static AUTH_MSG: &str = "auth";
static STATUS_MSG: &str = "status";
static TRANSPORT_MSG: &str = "transport";

/// Forwards event payloads to the AEP ingestion endpoint.
///
/// At most two attempts per event: the second attempt runs only when the
/// first answers 401 with an expired-token body, after a forced token
/// refresh. The retry outcome is final.
pub struct AepForwarder {
    credentials: Arc<Credentials>,
    tokens: Arc<TokenCache>,
    client: Client,
}

impl AepForwarder {
    pub fn new(credentials: Arc<Credentials>, tokens: Arc<TokenCache>) -> Self {
        // No request timeout here, the invocation deadline is the outer bound.
        let client = Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            credentials,
            tokens,
            client,
        }
    }

    pub async fn forward(&self, event: &Value) -> Result<Value, RelayError> {
        let metrics = get_metrics().await;
        let start = get_instant();

        let mut attempt = 0;
        loop {
            let token = self.tokens.get(attempt > 0).await.map_err(|e| {
                metrics.forward_failures.with_label_values(&[AUTH_MSG]).inc();
                e
            })?;

            info!("sending data to AEP URL: {}", self.credentials.aep_endpoint);
            metrics.forward_attempts.inc();

            let response = self
                .client
                .post(&self.credentials.aep_endpoint)
                .bearer_auth(&token)
                .header(HEADER_FLOW_ID, &self.credentials.flow_id)
                .header(HEADER_SANDBOX_NAME, &self.credentials.sandbox_name)
                .json(event)
                .send()
                .await
                .map_err(|e| {
                    error!("error sending to AEP: {}", e);
                    metrics
                        .forward_failures
                        .with_label_values(&[TRANSPORT_MSG])
                        .inc();
                    metrics.forward_duration.observe(start.elapsed().as_secs_f64());
                    RelayError::IngestionTransport(e)
                })?;

            let status = response.status();
            if status.is_success() {
                info!("successfully sent event to AEP: {}", status);
                metrics.forward_duration.observe(start.elapsed().as_secs_f64());
                let text = response.text().await.map_err(RelayError::IngestionTransport)?;
                return Ok(parse_ingestion_response(&text));
            }

            let body = response.text().await.unwrap_or_default();

            if status == StatusCode::UNAUTHORIZED && attempt == 0 && is_expired_token_body(&body) {
                warn!("access token expired, generating a new token and retrying");
                attempt += 1;
                continue;
            }

            error!("error sending to AEP, status: {}, body: {}", status, body);
            metrics.forward_failures.with_label_values(&[STATUS_MSG]).inc();
            metrics.forward_duration.observe(start.elapsed().as_secs_f64());
            return Err(RelayError::Ingestion {
                status: status.as_u16(),
                body,
            });
        }
    }
}

/// Classify a 401 body as an expired-token error.
///
/// AEP signals expiry either with a `title` containing "token expired"
/// ("Authorization token expired" included) or with the `EXEG-0503-401`
/// error type. The matching mirrors the provider's observed error contract
/// and is deliberately not any wider.
pub fn is_expired_token_body(body: &str) -> bool {
    let Ok(error_data) = serde_json::from_str::<Value>(body) else {
        return false;
    };
    let title = error_data
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase();
    let error_type = error_data
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default();

    title.contains("token expired") || error_type.contains(EXPIRED_TOKEN_ERROR_TYPE)
}

/// AEP replies are JSON in the normal case; anything else is wrapped so the
/// caller still receives a JSON object.
fn parse_ingestion_response(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => {
            info!("response was not JSON, returning text");
            json!({ "responseText": text })
        }
    }
}
