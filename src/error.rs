use http::StatusCode;
use thiserror::Error;

/// Failure taxonomy for one relay invocation.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Required configuration is absent; lists every missing variable.
    #[error("missing required environment variables: {}", .missing.join(", "))]
    Configuration { missing: Vec<String> },

    /// IMS is unreachable, answered non-2xx, or returned a malformed token
    /// response.
    #[error("IMS token request failed: {reason}")]
    AuthProvider { reason: String },

    /// AEP answered non-2xx after the single permitted retry.
    #[error("AEP ingestion returned {status}: {body}")]
    Ingestion { status: u16, body: String },

    /// The ingestion request never produced a response.
    #[error("AEP ingestion request failed: {0}")]
    IngestionTransport(#[source] reqwest::Error),
}

impl RelayError {
    /// HTTP status the ingest handler answers with for this failure.
    pub fn response_status(&self) -> StatusCode {
        match self {
            RelayError::Configuration { .. } | RelayError::AuthProvider { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Ingestion { .. } | RelayError::IngestionTransport(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Client-facing message; details stay in the logs.
    pub fn response_message(&self) -> &'static str {
        match self {
            RelayError::Configuration { .. } | RelayError::AuthProvider { .. } => {
                "Failed to authenticate with Adobe API"
            }
            RelayError::Ingestion { .. } | RelayError::IngestionTransport(_) => {
                "Failed to send event to Adobe Experience Platform"
            }
        }
    }
}
