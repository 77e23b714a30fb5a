// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use reqwest::Client;
use std::net::SocketAddr;

use crate::config::credentials::Credentials;
use crate::utils::constants::DEFAULT_SCOPES;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Credentials pointing at test upstreams, bypassing the environment.
pub fn test_credentials(aep_endpoint: &str, ims_endpoint: &str) -> Credentials {
    Credentials {
        aep_endpoint: aep_endpoint.to_string(),
        ims_endpoint: ims_endpoint.to_string(),
        client_id: "client-123".to_string(),
        client_secret: "secret-xyz".to_string(),
        ims_org: "1234567890ABCDEF@AdobeOrg".to_string(),
        technical_account_id: "ABCDEF1234567890@techacct.adobe.com".to_string(),
        scopes: DEFAULT_SCOPES.to_string(),
        flow_id: "flow-42".to_string(),
        sandbox_name: "prod".to_string(),
    }
}
