//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_verifications_total` (counter): attempts by outcome
//! - `gate_sweeps_total` (counter): completed reconciliation sweeps
//! - `gate_revocations_total` (counter): roles revoked by sweeps
//! - `gate_sweep_errors_total` (counter): isolated per-member failures
//! - `gate_bound_wallets` (gauge): bindings currently on file
//! - `gate_rpc_healthy` (gauge): 1 when the chain answers, 0 otherwise

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter with an HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(%addr, "metrics exporter listening"),
        Err(err) => tracing::error!(error = %err, "failed to install metrics exporter"),
    }
}

/// Count a verification attempt by outcome
/// (granted, denied, rejected, no_binding).
pub fn record_verification(outcome: &str) {
    counter!("gate_verifications_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a completed sweep.
pub fn record_sweep(revoked: u64, errors: u64) {
    counter!("gate_sweeps_total").increment(1);
    counter!("gate_revocations_total").increment(revoked);
    counter!("gate_sweep_errors_total").increment(errors);
}

/// Track the number of wallet bindings on file.
pub fn record_bound_wallets(count: usize) {
    gauge!("gate_bound_wallets").set(count as f64);
}

/// Track chain reachability.
pub fn record_rpc_health(healthy: bool) {
    gauge!("gate_rpc_healthy").set(if healthy { 1.0 } else { 0.0 });
}
