//! API routes.

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::cache::{list_cache, reset_cache, write_cache};
use crate::handlers::generate::generate_video;
use crate::handlers::groups::{create_group, group_status};
use crate::handlers::health::health;
use crate::handlers::jobs::get_job;
use crate::handlers::pipeline::start_pipeline;
use crate::handlers::query::query_video;
use crate::handlers::videos::{file_status, start_ingestion, upload_video};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let video_routes = Router::new()
        .route("/upload", post(upload_video))
        .route("/status", get(file_status))
        .route("/ingest", post(start_ingestion));

    let group_routes = Router::new()
        .route("/group", post(create_group))
        .route("/group", get(group_status));

    let query_routes = Router::new().route("/query", post(query_video));

    let cache_routes = Router::new()
        .route("/cache", get(list_cache))
        .route("/cache", post(write_cache))
        .route("/cache", delete(reset_cache));

    let generation_routes = Router::new()
        .route("/generate", post(generate_video))
        .route("/pipeline", post(start_pipeline));

    let job_routes = Router::new().route("/jobs/:job_id", get(get_job));

    let health_routes = Router::new().route("/health", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(video_routes)
        .merge(group_routes)
        .merge(query_routes)
        .merge(cache_routes)
        .merge(generation_routes)
        .merge(job_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Request body size limit, guards the upload path
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
