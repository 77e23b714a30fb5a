//! Shared constants and invariants

/// Default Adobe IMS token endpoint (client-credentials grant, v2).
pub const DEFAULT_IMS_ENDPOINT: &str = "https://ims-na1.adobelogin.com/ims/token/v2";

/// Default OAuth scopes requested when SCOPES is not configured.
pub const DEFAULT_SCOPES: &str =
    "openid,AdobeID,read_organizations,additional_info.projectedProductContext,session";

/// A token is never treated as valid within this margin of its stated expiry.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

/// Timeout for IMS token requests.
pub const IMS_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Token lifetime assumed when the IMS response carries no expires_in.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 86400;

/// AEP error `type` code identifying an expired access token.
pub const EXPIRED_TOKEN_ERROR_TYPE: &str = "EXEG-0503-401";

// AEP ingestion request headers
pub const HEADER_FLOW_ID: &str = "x-adobe-flow-id";
pub const HEADER_SANDBOX_NAME: &str = "x-sandbox-name";
