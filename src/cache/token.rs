use crate::utils::constants::TOKEN_REFRESH_MARGIN_SECS;

/// Bearer token with its computed absolute expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: i64, // UNIX timestamp
}

impl AccessToken {
    pub fn new(value: String, expires_at: i64) -> Self {
        Self { value, expires_at }
    }

    /// Usable iff more than the refresh margin remains before expiry.
    pub fn is_fresh(&self, now: i64) -> bool {
        now < self.expires_at - TOKEN_REFRESH_MARGIN_SECS
    }
}
