//! Prometheus metrics for the ledger operations.
//!
//! Metrics are exposed in Prometheus text format when `METRICS_BIND` is
//! configured; the counters are no-ops otherwise.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

/// Increment the deposits-approved counter.
pub fn deposits_approved_total() {
    metrics::counter!("deposits_approved_total").increment(1);
}

/// Increment the bets-placed counter.
pub fn bets_placed_total() {
    metrics::counter!("bets_placed_total").increment(1);
}

/// Increment the bets-settled counter.
pub fn bets_settled_total() {
    metrics::counter!("bets_settled_total").increment(1);
}

/// Increment the login-attempts counter.
pub fn login_attempts_total(success: bool) {
    metrics::counter!("login_attempts_total",
        "success" => success.to_string()
    )
    .increment(1);
}
