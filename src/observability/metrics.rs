//! Metrics collection.
//!
//! # Metrics
//! - `route_node_resolutions_total` (counter): resolutions by outcome and cache hit
//! - `route_node_transitions_total` (counter): store transitions by instrumentation
//! - `route_node_rerenders_total` (counter): re-renders by node
//!
//! Counters go to whatever recorder is installed; none is installed here.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::routing::NodeName;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Switch recording on or off process-wide (`observability.metrics_enabled`).
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn record_resolution(ok: bool, cached: bool) {
    if !is_enabled() {
        return;
    }
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!(
        "route_node_resolutions_total",
        "outcome" => outcome,
        "cached" => if cached { "true" } else { "false" }
    )
    .increment(1);
}

pub fn record_transition(instrumented: bool) {
    if !is_enabled() {
        return;
    }
    metrics::counter!(
        "route_node_transitions_total",
        "instrumented" => if instrumented { "true" } else { "false" }
    )
    .increment(1);
}

pub fn record_rerender(node: &NodeName) {
    if !is_enabled() {
        return;
    }
    metrics::counter!("route_node_rerenders_total", "node" => node.to_string()).increment(1);
}
