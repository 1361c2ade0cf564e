//! Router-level tests for the compute runner HTTP API.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.

use std::collections::HashSet;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use compute_runner::{http, AppState, Config};

fn build_app(config: Config) -> Router {
    http::create_router(AppState::new(&config).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn submit_raw(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/jobs", Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn submit(app: &Router, iterations: u64) -> Value {
    submit_raw(app, json!({ "iterations": iterations })).await
}

async fn poll_until_terminal(app: &Router, job_id: &str) -> Value {
    for _ in 0..500 {
        let response = send(app, Method::GET, &format!("/jobs/{job_id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        if json["status"] == "completed" || json["status"] == "failed" {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} did not finish in time");
}

#[tokio::test]
async fn submit_returns_pending_job_with_fresh_id() {
    let app = build_app(Config::default());

    let mut seen = HashSet::new();
    for _ in 0..5 {
        let json = submit(&app, 10).await;
        assert_eq!(json["status"], "pending");
        assert!(json["result"].is_null());
        assert!(json["created_at"].is_string());
        assert!(seen.insert(json["job_id"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn completed_job_reports_sum_and_is_idempotent() {
    let app = build_app(Config::default());
    let job = submit(&app, 10).await;
    let job_id = job["job_id"].as_str().unwrap();

    let done = poll_until_terminal(&app, job_id).await;
    assert_eq!(done["status"], "completed");
    assert_eq!(done["result"]["result"], 45);
    assert_eq!(done["result"]["iterations"], 10);
    assert!(done["result"]["computed_at"].is_string());
    assert_eq!(done["created_at"], job["created_at"]);

    let again = body_json(send(&app, Method::GET, &format!("/jobs/{job_id}"), None).await).await;
    assert_eq!(again, done);
}

#[tokio::test]
async fn empty_body_uses_default_iterations() {
    let app = build_app(Config::default());
    let job = submit_raw(&app, json!({})).await;

    let done = poll_until_terminal(&app, job["job_id"].as_str().unwrap()).await;
    assert_eq!(done["result"]["iterations"], 1_000_000);
}

#[tokio::test]
async fn unknown_job_returns_404() {
    let app = build_app(Config::default());

    for id in ["does-not-exist", "00000000-0000-0000-0000-000000000000", "%20"] {
        let response = send(&app, Method::GET, &format!("/jobs/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("not found"));
    }
}

#[tokio::test]
async fn submit_at_capacity_returns_503() {
    let app = build_app(Config {
        max_jobs: 2,
        ..Config::default()
    });

    submit(&app, 1).await;
    submit(&app, 1).await;

    let response = send(&app, Method::POST, "/jobs", Some(json!({ "iterations": 1 }))).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Max jobs reached"));
}

#[tokio::test]
async fn negative_iterations_rejected() {
    let app = build_app(Config::default());
    let response = send(&app, Method::POST, "/jobs", Some(json!({ "iterations": -5 }))).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn health_reports_worker_count() {
    let app = build_app(Config {
        workers: 3,
        ..Config::default()
    });

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok", "workers": 3 }));
}

#[tokio::test]
async fn root_describes_service() {
    let app = build_app(Config::default());
    let json = body_json(send(&app, Method::GET, "/", None).await).await;

    assert_eq!(json["app"], "Batch Compute Runner");
    assert_eq!(json["health"], "/health");
    assert_eq!(json["metrics"], "/metrics");
}

#[tokio::test]
async fn metrics_count_resolved_jobs() {
    let app = build_app(Config {
        workers: 2,
        ..Config::default()
    });

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(submit(&app, 10).await["job_id"].as_str().unwrap().to_string());
    }
    for id in &ids[..2] {
        poll_until_terminal(&app, id).await;
    }

    let response = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let text = body_text(response).await;
    assert!(text.contains("compute_jobs_total{status=\"completed\"} 2"));
    assert!(text.contains("compute_jobs_total{status=\"pending\"} 1"));
    assert!(text.contains("compute_workers_config 2"));
}
