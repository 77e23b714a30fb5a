use tokio::sync::Mutex;
use tracing::info;

use crate::cache::token::AccessToken;
use crate::error::RelayError;
use crate::helpers::time::now_i64;
use crate::observability::metrics::get_metrics;
use crate::sources::ims::ImsClient;

/// Process-wide access-token cache.
///
/// Owns the lock guarding the read-check-refresh-write sequence. The lock is
/// held across the issuer call so that concurrent invocations can neither
/// clobber each other's refresh nor observe a torn (token, expiry) pair.
pub struct TokenCache {
    issuer: ImsClient,
    state: Mutex<Option<AccessToken>>,
}

impl TokenCache {
    pub fn new(issuer: ImsClient) -> Self {
        Self {
            issuer,
            state: Mutex::new(None),
        }
    }

    /// Return a usable access token, issuing a fresh one when the cached
    /// token is absent or within the refresh margin of its expiry.
    ///
    /// `force_refresh` bypasses the cache check and always issues.
    pub async fn get(&self, force_refresh: bool) -> Result<String, RelayError> {
        let metrics = get_metrics().await;
        let mut state = self.state.lock().await;

        if !force_refresh {
            if let Some(token) = state.as_ref() {
                if token.is_fresh(now_i64()) {
                    info!("using existing token from memory cache");
                    metrics.token_cache_hits.inc();
                    return Ok(token.value.clone());
                }
            }
        }

        let trigger = if force_refresh {
            "forced"
        } else if state.is_some() {
            "expiring"
        } else {
            "cold"
        };
        info!(trigger, "token expired or not found, generating new token");

        let issued = self.issuer.issue().await?;
        let token = AccessToken::new(issued.access_token, now_i64() + issued.expires_in as i64);

        metrics.token_refreshes.with_label_values(&[trigger]).inc();
        metrics.token_expiry_unix.set(token.expires_at);

        let value = token.value.clone();
        *state = Some(token);
        Ok(value)
    }
}
