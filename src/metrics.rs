// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the Selectel DNS webhook.
//!
//! All metrics use the namespace prefix `selectel_dns_webhook_`.
//!
//! # Metrics Categories
//!
//! - **HTTP API Metrics** - Requests served to external-dns and their latency
//! - **Record-Set Metrics** - Create/update/delete operations and their outcome
//! - **Listing Metrics** - Endpoints reported by the last successful listing
//! - **Authentication Metrics** - Keystone token fetches
//!
//! # Example
//!
//! ```rust,no_run
//! use selectel_dns_webhook::metrics::{gather_metrics, record_rrset_operation};
//!
//! record_rrset_operation("create", "success");
//! let text = gather_metrics().unwrap();
//! ```

use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all webhook metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "selectel_dns_webhook";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// HTTP API Metrics
// ============================================================================

/// Total number of webhook HTTP requests
///
/// Labels:
/// - `method`: HTTP method
/// - `path`: Matched route (e.g., `/records`)
/// - `status`: Response status code
pub static HTTP_REQUESTS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_http_requests_total"),
        "Total number of webhook HTTP requests by method, path and status",
    );
    let counter = CounterVec::new(opts, &["method", "path", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of webhook HTTP requests in seconds
///
/// Labels:
/// - `method`: HTTP method
/// - `path`: Matched route
pub static HTTP_REQUEST_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_http_request_duration_seconds"),
        "Duration of webhook HTTP requests in seconds by method and path",
    )
    .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = HistogramVec::new(opts, &["method", "path"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Record-Set Metrics
// ============================================================================

/// Total number of record-set operations
///
/// Labels:
/// - `action`: `create`, `update` or `delete`
/// - `outcome`: `success`, `error` or `dry_run`
pub static RRSET_OPERATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_rrset_operations_total"),
        "Total number of record-set operations by action and outcome",
    );
    let counter = CounterVec::new(opts, &["action", "outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Listing Metrics
// ============================================================================

/// Number of endpoints returned by the last successful listing
pub static ENDPOINTS_LISTED: LazyLock<Gauge> = LazyLock::new(|| {
    let gauge = Gauge::new(
        format!("{METRICS_NAMESPACE}_endpoints_listed"),
        "Number of endpoints returned by the last successful record listing",
    )
    .unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Authentication Metrics
// ============================================================================

/// Total number of Keystone token fetches
///
/// Labels:
/// - `outcome`: `success` or `error`
pub static TOKEN_FETCHES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_token_fetches_total"),
        "Total number of Keystone token fetches by outcome",
    );
    let counter = CounterVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record one served HTTP request
///
/// # Arguments
/// * `method` - HTTP method
/// * `path` - Matched route
/// * `status` - Response status code
/// * `duration` - Time spent serving the request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a record-set operation
///
/// # Arguments
/// * `action` - `create`, `update` or `delete`
/// * `outcome` - `success`, `error` or `dry_run`
pub fn record_rrset_operation(action: &str, outcome: &str) {
    RRSET_OPERATIONS_TOTAL
        .with_label_values(&[action, outcome])
        .inc();
}

/// Record the size of a successful listing
#[allow(clippy::cast_precision_loss)]
pub fn record_endpoints_listed(count: usize) {
    ENDPOINTS_LISTED.set(count as f64);
}

/// Record a Keystone token fetch
pub fn record_token_fetch(outcome: &str) {
    TOKEN_FETCHES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Returns
/// Prometheus-formatted metrics as a String
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
