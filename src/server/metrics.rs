use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all service metrics
const PREFIX: &str = "mbdata";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Lookup Metrics
    pub static ref RELEASE_LOOKUPS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_release_lookups_total"), "Release lookups by outcome"),
        &["operation", "outcome"]
    ).expect("Failed to create release_lookups_total metric");

    pub static ref RELEASE_LOOKUP_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_release_lookup_duration_seconds"),
            "Catalog time spent on a release lookup in seconds"
        )
        .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["operation"]
    ).expect("Failed to create release_lookup_duration_seconds metric");

    // Catalog Metrics
    pub static ref CATALOG_RELEASES_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_releases_total"),
        "Total releases in catalog"
    ).expect("Failed to create catalog_releases_total metric");
}

/// Outcome label of a release lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookupOutcome {
    Found,
    NotFound,
    Error,
}

impl LookupOutcome {
    fn as_label(&self) -> &'static str {
        match self {
            LookupOutcome::Found => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Error => "error",
        }
    }
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(RELEASE_LOOKUPS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RELEASE_LOOKUP_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_RELEASES_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Initialize catalog-specific metrics
pub fn init_catalog_metrics(num_releases: usize) {
    CATALOG_RELEASES_TOTAL.set(num_releases as f64);
    tracing::info!("Catalog metrics initialized: {} releases", num_releases);
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record a release lookup
pub fn record_release_lookup(operation: &str, outcome: LookupOutcome, duration: Duration) {
    RELEASE_LOOKUPS_TOTAL
        .with_label_values(&[operation, outcome.as_label()])
        .inc();

    RELEASE_LOOKUP_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
