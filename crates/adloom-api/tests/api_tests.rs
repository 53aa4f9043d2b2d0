//! API integration tests.
//!
//! Each test runs the real router via `tower::ServiceExt::oneshot`, backed
//! by wiremock upstreams and a tempdir for the videos directory and cache
//! file.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adloom_api::{create_router, ApiConfig, AppState};

struct TestApp {
    app: Router,
    graphon: MockServer,
    gemini: MockServer,
    _dir: TempDir,
}

async fn test_app() -> TestApp {
    std::env::set_var("GRAPHON_API_KEY", "test-key");
    std::env::set_var("GEMINI_API_KEY", "test-key");

    let graphon = MockServer::start().await;
    let gemini = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let config = ApiConfig {
        graphon_api_url: graphon.uri(),
        gemini_api_url: gemini.uri(),
        videos_dir: dir.path().join("videos"),
        cache_file: dir.path().join(".graphon_cache.json"),
        file_poll_attempts: 10,
        file_poll_interval: Duration::from_millis(1),
        group_poll_attempts: 10,
        group_poll_interval: Duration::from_millis(1),
        operation_poll_attempts: 10,
        operation_poll_interval: Duration::from_millis(1),
        ..ApiConfig::default()
    };

    std::fs::create_dir_all(&config.videos_dir).unwrap();
    std::fs::write(config.videos_dir.join("goku.mp4"), b"fake video bytes").unwrap();

    let state = AppState::new(config).unwrap();
    let app = create_router(state, None);

    TestApp {
        app,
        graphon,
        gemini,
        _dir: dir,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Drive a background job to its terminal state via the jobs endpoint.
async fn await_job(app: &Router, job_id: &str) -> Value {
    for _ in 0..500 {
        let (status, body) = send(app, get(&format!("/jobs/{}", job_id))).await;
        assert_eq!(status, StatusCode::OK);
        let state = body["state"].as_str().unwrap();
        if state == "completed" || state == "failed" {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job {} never reached a terminal state", job_id);
}

async fn mount_ingestion_mocks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/files/upload-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_id": "file-1",
            "upload_url": format!("{}/uploads/goku.mp4", server.uri()),
        })))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/uploads/goku.mp4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/files/file-1/process"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_reports_version() {
    let t = test_app().await;

    let (status, body) = send(&t.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(!body["version"].as_str().unwrap().is_empty());
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_unknown_job_returns_not_found() {
    let t = test_app().await;

    let (status, body) = send(&t.app, get("/jobs/no-such-job")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Job not found"));
}

#[tokio::test]
async fn test_query_without_ingested_video_returns_not_found() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        post_json("/query", json!({"query": "where is goku?"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("No processed video found"));
}

#[tokio::test]
async fn test_cache_round_trip() {
    let t = test_app().await;

    let (status, entry) = send(
        &t.app,
        post_json(
            "/cache",
            json!({"video_name": "goku.mp4", "file_id": "file-1", "group_id": "group-9"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["file_id"], "file-1");
    assert_eq!(entry["group_id"], "group-9");
    assert!(entry["created_at"].as_str().unwrap().contains('T'));

    let (status, table) = send(&t.app, get("/cache")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["goku.mp4"]["group_id"], "group-9");

    let (status, body) = send(&t.app, delete("/cache?video_name=goku.mp4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], true);

    let (status, table) = send(&t.app, get("/cache")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table.as_object().unwrap().len(), 0);
}

#[tokio::test]
async fn test_cache_clear_removes_all_entries() {
    let t = test_app().await;

    for (name, group) in [("goku.mp4", "group-1"), ("vegeta.mp4", "group-2")] {
        let (status, _) = send(
            &t.app,
            post_json(
                "/cache",
                json!({"video_name": name, "file_id": "file-x", "group_id": group}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&t.app, delete("/cache")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], true);

    let (_, table) = send(&t.app, get("/cache")).await;
    assert_eq!(table.as_object().unwrap().len(), 0);
}

#[tokio::test]
async fn test_upload_returns_file_id() {
    let t = test_app().await;
    mount_ingestion_mocks(&t.graphon).await;

    let (status, body) = send(&t.app, post_json("/upload", json!({"video_name": "goku.mp4"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file_id"], "file-1");
}

#[tokio::test]
async fn test_upload_missing_video_returns_not_found() {
    let t = test_app().await;

    let (status, body) = send(&t.app, post_json("/upload", json!({"video_name": "nope.mp4"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Video not found"));
}

#[tokio::test]
async fn test_file_status_passes_through() {
    let t = test_app().await;
    Mock::given(method("GET"))
        .and(path("/files/file-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_id": "file-9",
            "processing_status": "PROCESSING",
        })))
        .mount(&t.graphon)
        .await;

    let (status, body) = send(&t.app, get("/status?fileId=file-9")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processing_status"], "PROCESSING");
}

#[tokio::test]
async fn test_create_group_rejects_empty_file_ids() {
    let t = test_app().await;

    let (status, body) = send(&t.app, post_json("/group", json!({"file_ids": []}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("file_ids"));
}

#[tokio::test]
async fn test_group_status_maps_upstream_failure_to_bad_gateway() {
    let t = test_app().await;
    Mock::given(method("GET"))
        .and(path("/groups/g-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&t.graphon)
        .await;

    let (status, body) = send(&t.app, get("/group?groupId=g-1")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Group status"));
    assert!(message.contains("backend exploded"));
}

#[tokio::test]
async fn test_query_uses_named_cache_entry() {
    let t = test_app().await;
    for (name, group) in [("goku.mp4", "group-1"), ("vegeta.mp4", "group-2")] {
        send(
            &t.app,
            post_json(
                "/cache",
                json!({"video_name": name, "file_id": "file-x", "group_id": group}),
            ),
        )
        .await;
    }

    Mock::given(method("POST"))
        .and(path("/groups/group-1/query"))
        .and(body_partial_json(json!({"query": "where is goku?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "On the hill.",
            "sources": [
                {
                    "node_type": "video",
                    "start_time": 65.0,
                    "end_time": 80.0,
                    "text": "Goku waves from the hill"
                },
                {"node_type": "document", "text": "a transcript chunk"}
            ],
        })))
        .expect(1)
        .mount(&t.graphon)
        .await;

    let (status, body) = send(
        &t.app,
        post_json(
            "/query",
            json!({"query": "where is goku?", "video_name": "goku.mp4"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "On the hill.");
    let segments = body["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0]["start_time"], "1:05");
    assert_eq!(segments[0]["reasoning"], "Goku waves from the hill");
}

#[tokio::test]
async fn test_query_falls_back_to_most_recent_entry() {
    let t = test_app().await;
    send(
        &t.app,
        post_json(
            "/cache",
            json!({"video_name": "old.mp4", "file_id": "file-a", "group_id": "group-old"}),
        ),
    )
    .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    send(
        &t.app,
        post_json(
            "/cache",
            json!({"video_name": "new.mp4", "file_id": "file-b", "group_id": "group-new"}),
        ),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/groups/group-new/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "From the latest video.",
            "sources": [],
        })))
        .expect(1)
        .mount(&t.graphon)
        .await;

    let (status, body) = send(
        &t.app,
        post_json("/query", json!({"query": "what happens?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "From the latest video.");
}

#[tokio::test]
async fn test_ingest_job_runs_to_completion() {
    let t = test_app().await;
    mount_ingestion_mocks(&t.graphon).await;
    Mock::given(method("GET"))
        .and(path("/files/file-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_id": "file-1",
            "processing_status": "SUCCESS",
        })))
        .mount(&t.graphon)
        .await;
    Mock::given(method("POST"))
        .and(path("/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "group_id": "group-9",
            "graph_status": "ready",
        })))
        .mount(&t.graphon)
        .await;

    let (status, accepted) = send(&t.app, post_json("/ingest", json!({"video_name": "goku.mp4"}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(accepted["status"], "queued");

    let record = await_job(&t.app, accepted["job_id"].as_str().unwrap()).await;
    assert_eq!(record["state"], "completed");
    assert_eq!(record["group_id"], "group-9");

    // A completed run records the video for later queries.
    let (_, table) = send(&t.app, get("/cache")).await;
    assert_eq!(table["goku.mp4"]["group_id"], "group-9");
}

#[tokio::test]
async fn test_ingest_failure_surfaces_in_job_record() {
    let t = test_app().await;
    mount_ingestion_mocks(&t.graphon).await;
    Mock::given(method("GET"))
        .and(path("/files/file-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file_id": "file-1",
            "processing_status": "FAILURE",
            "error_message": "corrupt container",
        })))
        .mount(&t.graphon)
        .await;

    let (status, accepted) = send(&t.app, post_json("/ingest", json!({"video_name": "goku.mp4"}))).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let record = await_job(&t.app, accepted["job_id"].as_str().unwrap()).await;
    assert_eq!(record["state"], "failed");
    assert!(record["message"].as_str().unwrap().contains("corrupt container"));
}

#[tokio::test]
async fn test_generate_submits_generation_operation() {
    let t = test_app().await;
    Mock::given(method("POST"))
        .and(path("/models/veo-3.1-generate-preview:predictLongRunning"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "instances": [{"prompt": "a capybara riding a bus"}],
            "parameters": {"durationSeconds": 8, "aspectRatio": "16:9"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/op-7",
        })))
        .expect(1)
        .mount(&t.gemini)
        .await;

    let (status, body) = send(
        &t.app,
        post_json("/generate", json!({"prompt": "a capybara riding a bus"})),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["operation_name"], "operations/op-7");
}

#[tokio::test]
async fn test_generate_rejects_blank_prompt() {
    let t = test_app().await;

    let (status, body) = send(&t.app, post_json("/generate", json!({"prompt": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_pipeline_job_runs_to_completion() {
    let t = test_app().await;

    // Cut detection finds no snippets, so the run goes straight to merge.
    Mock::given(method("POST"))
        .and(path("/models/gemini-3.0-flash-preview:predictLongRunning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/cut-1",
        })))
        .expect(1)
        .mount(&t.gemini)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/cut-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/cut-1",
            "done": true,
            "response": {"snippets": []},
        })))
        .mount(&t.gemini)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/veo-3.1-generate-preview:predictLongRunning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/merge-1",
        })))
        .expect(1)
        .mount(&t.gemini)
        .await;
    Mock::given(method("GET"))
        .and(path("/operations/merge-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "operations/merge-1",
            "done": true,
            "response": {},
        })))
        .mount(&t.gemini)
        .await;

    let (status, accepted) = send(
        &t.app,
        post_json(
            "/pipeline",
            json!({"video_name": "goku.mp4", "placements": [{"character": "Goku", "brand": "Capsule Corp"}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(accepted["status"], "queued");

    let record = await_job(&t.app, accepted["job_id"].as_str().unwrap()).await;
    assert_eq!(record["state"], "completed");
}
