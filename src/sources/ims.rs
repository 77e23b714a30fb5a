use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::credentials::Credentials;
use crate::error::RelayError;
use crate::utils::constants::{DEFAULT_EXPIRES_IN_SECS, IMS_REQUEST_TIMEOUT_SECS};

/// Raw IMS token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Token issued by IMS together with its stated lifetime.
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// OAuth2 client-credentials client for the Adobe IMS token endpoint.
#[derive(Clone)]
pub struct ImsClient {
    credentials: Arc<Credentials>,
    client: Client,
}

impl ImsClient {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(IMS_REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            credentials,
            client,
        }
    }

    /// Perform the client-credentials grant and return the fresh token.
    pub async fn issue(&self) -> Result<IssuedToken, RelayError> {
        info!("generating new Adobe access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.credentials.scopes.as_str()),
        ];

        let response = self
            .client
            .post(&self.credentials.ims_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("error generating token: {}", e);
                auth_error(format!("request error: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("IMS token request returned {}, body: {}", status, body);
            return Err(auth_error(format!("status {status}, body: {body}")));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            error!("malformed IMS token response: {}", e);
            auth_error(format!("malformed token response: {e}"))
        })?;

        Ok(IssuedToken {
            access_token: token.access_token,
            expires_in: token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        })
    }
}

fn auth_error(reason: String) -> RelayError {
    RelayError::AuthProvider { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_deserialization() {
        let json = r#"{
            "access_token": "eyJhbGciOiJSUzI1NiJ9.abc",
            "token_type": "bearer",
            "expires_in": 86399
        }"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "eyJhbGciOiJSUzI1NiJ9.abc");
        assert_eq!(response.expires_in, Some(86399));
    }

    #[test]
    fn token_response_without_expiry() {
        let json = r#"{"access_token": "token_12345"}"#;

        let response: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "token_12345");
        assert_eq!(response.expires_in, None);
        assert_eq!(
            response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
            86400
        );
    }

    #[test]
    fn token_response_requires_access_token() {
        let json = r#"{"expires_in": 3600}"#;
        assert!(serde_json::from_str::<TokenResponse>(json).is_err());
    }
}
