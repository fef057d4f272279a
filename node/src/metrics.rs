//! # Prometheus Metrics
//!
//! Exposes operational metrics for the ledger node. Scraped by Prometheus
//! at the `/metrics` HTTP endpoint on the configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so they
//! do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// Clone-friendly (wraps `Arc` internally via prometheus handles) so it can
/// be shared across request handlers and background tasks.
#[derive(Clone)]
pub struct NodeMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Total number of stakes admitted since startup.
    pub stakes_created_total: IntCounter,
    /// Total number of stakes closed since startup.
    pub stakes_closed_total: IntCounter,
    /// Total number of reward claims served (partial claims and the
    /// settlement leg of closes).
    pub reward_claims_total: IntCounter,
    /// Total rewards paid out, in asset units.
    pub rewards_paid_total: IntCounter,
    /// Sum of active principals across all accounts.
    pub total_staked: IntGauge,
    /// Number of currently open stakes.
    pub active_stakes: IntGauge,
    /// Histogram of ledger operation latency in seconds.
    pub operation_latency_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("haven".into()), None)
            .expect("failed to create prometheus registry");

        let stakes_created_total = IntCounter::new(
            "stakes_created_total",
            "Total number of stakes admitted since startup",
        )
        .expect("metric creation");
        registry
            .register(Box::new(stakes_created_total.clone()))
            .expect("metric registration");

        let stakes_closed_total = IntCounter::new(
            "stakes_closed_total",
            "Total number of stakes closed since startup",
        )
        .expect("metric creation");
        registry
            .register(Box::new(stakes_closed_total.clone()))
            .expect("metric registration");

        let reward_claims_total = IntCounter::new(
            "reward_claims_total",
            "Total number of reward claims served",
        )
        .expect("metric creation");
        registry
            .register(Box::new(reward_claims_total.clone()))
            .expect("metric registration");

        let rewards_paid_total = IntCounter::new(
            "rewards_paid_total",
            "Total rewards paid out in asset units",
        )
        .expect("metric creation");
        registry
            .register(Box::new(rewards_paid_total.clone()))
            .expect("metric registration");

        let total_staked = IntGauge::new(
            "total_staked",
            "Sum of active principals across all accounts",
        )
        .expect("metric creation");
        registry
            .register(Box::new(total_staked.clone()))
            .expect("metric registration");

        let active_stakes = IntGauge::new("active_stakes", "Number of currently open stakes")
            .expect("metric creation");
        registry
            .register(Box::new(active_stakes.clone()))
            .expect("metric registration");

        let operation_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "operation_latency_seconds",
                "Ledger operation latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(operation_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            stakes_created_total,
            stakes_closed_total,
            reward_claims_total,
            rewards_paid_total,
            total_staked,
            active_stakes,
            operation_latency_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

/// Shared metrics state passed to axum handlers via extension.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails (should never happen in practice).
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}
