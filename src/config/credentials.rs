use std::env;

use tracing::{error, info};

use crate::error::RelayError;
use crate::utils::constants::{DEFAULT_IMS_ENDPOINT, DEFAULT_SCOPES};

/// Static configuration for authenticating against IMS and forwarding to AEP.
///
/// All fields are plain strings resolved from the process environment.
/// `resolve` only reads the environment; it is idempotent and safe to call
/// repeatedly.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub aep_endpoint: String,
    pub ims_endpoint: String,
    pub client_id: String,
    pub client_secret: String,
    pub ims_org: String,
    pub technical_account_id: String,
    /// Comma-joined scope list, passed to IMS as-is.
    pub scopes: String,
    pub flow_id: String,
    pub sandbox_name: String,
}

impl Credentials {
    /// Resolve credentials from environment variables.
    ///
    /// `IMS_ENDPOINT` and `SCOPES` fall back to Adobe defaults and
    /// `TECHNICAL_ACCOUNT_ID` may be empty; every other field is required
    /// and all missing variables are reported together.
    pub fn resolve() -> Result<Self, RelayError> {
        info!("resolving AEP credentials from environment variables");

        let credentials = Self {
            aep_endpoint: env_or_empty("AEP_ENDPOINT"),
            ims_endpoint: env_or_default("IMS_ENDPOINT", DEFAULT_IMS_ENDPOINT),
            client_id: env_or_empty("CLIENT_ID"),
            client_secret: env_or_empty("CLIENT_SECRET"),
            ims_org: env_or_empty("IMS_ORG"),
            technical_account_id: env_or_empty("TECHNICAL_ACCOUNT_ID"),
            scopes: env_or_default("SCOPES", DEFAULT_SCOPES),
            flow_id: env_or_empty("FLOW_ID"),
            sandbox_name: env_or_empty("SANDBOX_NAME"),
        };

        let missing: Vec<String> = [
            ("AEP_ENDPOINT", &credentials.aep_endpoint),
            ("CLIENT_ID", &credentials.client_id),
            ("CLIENT_SECRET", &credentials.client_secret),
            ("IMS_ORG", &credentials.ims_org),
            ("FLOW_ID", &credentials.flow_id),
            ("SANDBOX_NAME", &credentials.sandbox_name),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

        if !missing.is_empty() {
            error!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
            return Err(RelayError::Configuration { missing });
        }

        Ok(credentials)
    }
}

fn env_or_empty(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

fn env_or_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
