use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use aep_relay::cache::token_cache::TokenCache;
use aep_relay::config::credentials::Credentials;
use aep_relay::config::settings::ServerConfig;
use aep_relay::observability::metrics::get_metrics;
use aep_relay::server::server::{self, AppState};
use aep_relay::sinks::aep::AepForwarder;
use aep_relay::sources::ims::ImsClient;
use aep_relay::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "PORT", default_value = "8080")]
    port: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read env and CLI args
    // -------------------------------

    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::run(args.log_level);

    // -------------------------------
    // 2. Resolve AEP credentials
    // -------------------------------

    let credentials = Arc::new(Credentials::resolve()?);

    // -------------------------------
    // 3. Wire token issuer, cache and forwarder
    // -------------------------------

    let issuer = ImsClient::new(credentials.clone());
    let tokens = Arc::new(TokenCache::new(issuer));
    let forwarder = Arc::new(AepForwarder::new(credentials, tokens));

    // -------------------------------
    // 4. Start HTTP server
    // -------------------------------

    let metrics = get_metrics().await;
    let state = AppState::new(metrics, forwarder);
    let server_config = ServerConfig::new(args.host, args.port);

    info!("Service starting...");
    server::start(&server_config, state).await
}
