//! # Metrics
//!
//! Prometheus registry owned by `AppState`. Holds the default process
//! collector plus request and checkout counters, and renders the text
//! snapshot served on `/metrics`.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use shop_core::{ShopError, ShopResult};
use std::sync::Arc;

const NAMESPACE: &str = "storefront";

/// Outcome label for checkout attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Session created by the provider
    Created,
    /// Rejected before or by the provider as an invalid request
    Rejected,
    /// Provider, network or decoding failure
    Failed,
}

impl CheckoutOutcome {
    fn as_str(self) -> &'static str {
        match self {
            CheckoutOutcome::Created => "created",
            CheckoutOutcome::Rejected => "rejected",
            CheckoutOutcome::Failed => "failed",
        }
    }
}

/// Process-wide measurements, injected through application state
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    http_requests_total: IntCounterVec,
    checkout_sessions_total: IntCounterVec,
}

impl Metrics {
    /// Create a registry with the default collectors registered
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        let build_info = IntGaugeVec::new(
            Opts::new("build_info", "Build information").namespace(NAMESPACE),
            &["version"],
        )?;
        build_info
            .with_label_values(&[env!("CARGO_PKG_VERSION")])
            .set(1);

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of routed HTTP requests")
                .namespace(NAMESPACE),
            &["method", "route", "status"],
        )?;

        let checkout_sessions_total = IntCounterVec::new(
            Opts::new(
                "checkout_sessions_total",
                "Checkout session attempts by outcome",
            )
            .namespace(NAMESPACE),
            &["result"],
        )?;

        registry.register(Box::new(build_info))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(checkout_sessions_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            http_requests_total,
            checkout_sessions_total,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Record a routed HTTP request
    pub fn record_request(&self, method: &str, route: &str, status: u16) {
        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, route, status.as_str()])
            .inc();
    }

    /// Record a checkout attempt
    pub fn record_checkout(&self, outcome: CheckoutOutcome) {
        self.checkout_sessions_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Encode the current snapshot.
    ///
    /// Returns the encoder's content type together with the body.
    pub fn encode(&self) -> ShopResult<(String, Vec<u8>)> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| ShopError::Metrics(e.to_string()))?;

        Ok((encoder.format_type().to_string(), buffer))
    }
}

/// Route-layer middleware counting requests by matched route template.
///
/// Static fallback requests never reach a route layer, so arbitrary asset
/// paths do not become label values.
pub async fn track_requests(
    State(metrics): State<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics.record_request(&method, &route, response.status().as_u16());
    response
}
