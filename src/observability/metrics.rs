use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Ingest metrics
    pub ingest_requests: IntCounterVec,

    // Forward metrics
    pub forward_attempts: IntCounter,
    pub forward_failures: IntCounterVec,
    pub forward_duration: Histogram,

    // Token metrics
    pub token_cache_hits: IntCounter,
    pub token_refreshes: IntCounterVec,
    pub token_expiry_unix: IntGauge,

    // Runtime
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("aeprelay".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            ingest_requests: IntCounterVec::new(Opts::new("ingest_requests_total", "Inbound ingest requests by outcome"), &["outcome"]).unwrap(),

            forward_attempts: IntCounter::new("forward_attempts_total", "Outbound POSTs to AEP").unwrap(),
            forward_failures: IntCounterVec::new(Opts::new("forward_failures_total", "Forwarding failures by reason"), &["reason"]).unwrap(),
            forward_duration: Histogram::with_opts(HistogramOpts::new("forward_duration_seconds", "Event forwarding duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),

            token_cache_hits: IntCounter::new("token_cache_hits_total", "Tokens served from the memory cache").unwrap(),
            token_refreshes: IntCounterVec::new(Opts::new("token_refreshes_total", "Token refreshes by trigger"), &["trigger"]).unwrap(),
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Current token expiry timestamp").unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.ingest_requests.clone())).unwrap();
        reg.register(Box::new(metrics.forward_attempts.clone())).unwrap();
        reg.register(Box::new(metrics.forward_failures.clone())).unwrap();
        reg.register(Box::new(metrics.forward_duration.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_refreshes.clone())).unwrap();
        reg.register(Box::new(metrics.token_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
