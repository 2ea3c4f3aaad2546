//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Convertify server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Conversion outcomes by target format
//! - Downloads by format and upload sizes

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use regex_lite::Regex;
use tracing::error;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "convertify_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .expect("valid metric definition")
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("convertify_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("valid metric definition")
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "convertify_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .expect("valid metric definition")
});

// =============================================================================
// Conversion Metrics
// =============================================================================

/// Conversion requests by target format and outcome.
pub static CONVERSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "convertify_conversions_total",
            "Conversion requests by target format and outcome",
        ),
        &["target_format", "outcome"],
    )
    .expect("valid metric definition")
});

/// Downloads served by format.
pub static DOWNLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("convertify_downloads_total", "Downloads served by format"),
        &["format"],
    )
    .expect("valid metric definition")
});

/// Size of accepted uploads in bytes.
pub static UPLOAD_BYTES: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("convertify_upload_bytes", "Size of accepted uploads in bytes")
            .buckets(prometheus::exponential_buckets(1024.0, 4.0, 10).unwrap_or_default()),
    )
    .expect("valid metric definition")
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        Box::new(CONVERSIONS_TOTAL.clone()),
        Box::new(DOWNLOADS_TOTAL.clone()),
        Box::new(UPLOAD_BYTES.clone()),
    ];
    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            error!("Failed to register metric: {}", e);
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

static UUID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("valid regex")
});

static DOWNLOAD_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/api/download/[^/]+$").expect("valid regex"));

/// Normalize a path for metric labels (replace IDs with placeholders).
///
/// Download identifiers are arbitrary strings, so that route always collapses
/// to `/api/download/{id}`.
pub fn normalize_path(path: &str) -> String {
    if DOWNLOAD_SEGMENT.is_match(path) {
        return "/api/download/{id}".to_string();
    }
    UUID_SEGMENT.replace_all(path, "{id}").into_owned()
}
