//! Prometheus metrics for the triage gateway.
//!
//! Counters cover the event pipeline end to end: events received, routing
//! decisions by destination, and classifier fallbacks by reason, plus a
//! latency histogram for the oracle call (the only operation expected to
//! block for non-trivial wall-clock time).

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

use crate::error::{AppError, Result};

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Total number of events received on the webhook
    pub static ref EVENTS_RECEIVED_TOTAL: Counter = Counter::with_opts(
        Opts::new("events_received_total", "Total number of events received")
            .namespace("call_triage"),
    ).expect("Failed to create EVENTS_RECEIVED_TOTAL metric");

    /// Routing decisions by destination
    ///
    /// Labels: destination
    pub static ref EVENTS_ROUTED_TOTAL: CounterVec = CounterVec::new(
        Opts::new("events_routed_total", "Total number of routed events")
            .namespace("call_triage"),
        &["destination"]
    ).expect("Failed to create EVENTS_ROUTED_TOTAL metric");

    /// Heuristic fallbacks by reason
    ///
    /// Labels: reason (unavailable, timeout)
    pub static ref CLASSIFIER_FALLBACKS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(
            "classifier_fallbacks_total",
            "Classification requests that degraded to the heuristic"
        )
        .namespace("call_triage"),
        &["reason"]
    ).expect("Failed to create CLASSIFIER_FALLBACKS_TOTAL metric");

    /// Oracle call duration in seconds
    pub static ref CLASSIFY_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("classify_duration_seconds", "Oracle call duration in seconds")
            .namespace("call_triage")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0]),
    ).expect("Failed to create CLASSIFY_DURATION_SECONDS metric");
}

/// Register all metrics with the global registry
pub fn init_metrics() -> Result<()> {
    PROMETHEUS_REGISTRY
        .register(Box::new(EVENTS_RECEIVED_TOTAL.clone()))
        .map_err(|e| AppError::Internal(format!("Failed to register metric: {}", e)))?;
    PROMETHEUS_REGISTRY
        .register(Box::new(EVENTS_ROUTED_TOTAL.clone()))
        .map_err(|e| AppError::Internal(format!("Failed to register metric: {}", e)))?;
    PROMETHEUS_REGISTRY
        .register(Box::new(CLASSIFIER_FALLBACKS_TOTAL.clone()))
        .map_err(|e| AppError::Internal(format!("Failed to register metric: {}", e)))?;
    PROMETHEUS_REGISTRY
        .register(Box::new(CLASSIFY_DURATION_SECONDS.clone()))
        .map_err(|e| AppError::Internal(format!("Failed to register metric: {}", e)))?;
    Ok(())
}

/// Gather all metrics in Prometheus text exposition format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
