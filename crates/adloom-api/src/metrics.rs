//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "adloom_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "adloom_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "adloom_http_requests_in_flight";

    // Workflow metrics
    pub const INGEST_JOBS_TOTAL: &str = "adloom_ingest_jobs_total";
    pub const PIPELINE_JOBS_TOTAL: &str = "adloom_pipeline_jobs_total";
    pub const GENERATION_REQUESTS_TOTAL: &str = "adloom_generation_requests_total";

    // Cache metrics
    pub const CACHE_LOOKUPS_TOTAL: &str = "adloom_cache_lookups_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record an accepted ingestion job.
pub fn record_ingest_job() {
    counter!(names::INGEST_JOBS_TOTAL).increment(1);
}

/// Record an accepted branding pipeline job.
pub fn record_pipeline_job() {
    counter!(names::PIPELINE_JOBS_TOTAL).increment(1);
}

/// Record a generation submission.
pub fn record_generation_request(model: &str) {
    let labels = [("model", model.to_string())];
    counter!(names::GENERATION_REQUESTS_TOTAL, &labels).increment(1);
}

/// Record a cache lookup outcome ("hit" or "miss").
pub fn record_cache_lookup(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::CACHE_LOOKUPS_TOTAL, &labels).increment(1);
}

/// Sanitize path for metrics labels (collapse job ids).
fn sanitize_path(path: &str) -> String {
    let path = regex_lite::Regex::new(
        r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
    )
    .unwrap()
    .replace_all(path, ":job_id");
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
