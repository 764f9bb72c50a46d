//! API integration tests.

use std::fs;
use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use atune_api::{create_router, ApiConfig, AppState};
use atune_vision::PipelineConfig;

fn create_test_router() -> Router {
    let state = AppState::new(ApiConfig::default(), PipelineConfig::default()).unwrap();
    create_router(state, None)
}

fn create_media_router(media_root: &Path) -> Router {
    let config = ApiConfig {
        media_root: media_root.to_path_buf(),
        ..Default::default()
    };
    let state = AppState::new(config, PipelineConfig::default()).unwrap();
    create_router(state, None)
}

fn observation(frame: u64, x: f64, angle: f64, confidence: f64) -> Value {
    json!({
        "frame_index": frame,
        "timestamp": frame as f64 / 240.0,
        "bbox": {"x": x - 20.0, "y": 100.0, "width": 40.0, "height": 6.0},
        "confidence": confidence,
        "angle": angle,
        "center": {"x": x, "y": 103.0},
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send(create_test_router(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_root_endpoint() {
    let (status, body) = send(create_test_router(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Arrow Tuning System API");
    assert_eq!(body["docs"], "/docs");
}

#[tokio::test]
async fn test_docs_endpoint() {
    let (status, body) = send(create_test_router(), get("/docs")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["POST /api/v1/analyze/trajectory"]["request"].is_object());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("X-Request-ID", "shot-42")
        .body(Body::empty())
        .unwrap();
    let response = create_test_router().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["X-Request-ID"], "shot-42");
}

#[tokio::test]
async fn test_metrics_disabled() {
    let (status, _) = send(create_test_router(), get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_trajectory_high_tear() {
    let observations = vec![
        observation(0, 100.0, 3.0, 0.9),
        observation(1, 112.0, 4.0, 0.9),
        observation(2, 124.0, 7.5, 0.9),
    ];
    let (status, body) = send(
        create_test_router(),
        post_json(
            "/api/v1/analyze/trajectory",
            json!({ "observations": observations }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tear_type"], "high");
    assert_eq!(body["confidence"], 0.85);
    assert_eq!(
        body["recommendations"],
        json!([
            "lower nocking point 1/16\"",
            "check top cam timing",
            "verify d-loop length"
        ])
    );
    assert_eq!(body["measurements"]["entry_angle"], 7.5);
    assert_eq!(body["trajectory"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_analyze_empty_trajectory() {
    let (status, body) = send(
        create_test_router(),
        post_json("/api/v1/analyze/trajectory", json!({ "observations": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tear_type"], "unknown");
    assert_eq!(body["confidence"], 0.0);
}

#[tokio::test]
async fn test_analyze_trajectory_out_of_order() {
    let observations = vec![observation(5, 0.0, 0.0, 0.9), observation(3, 10.0, 0.0, 0.9)];
    let (status, body) = send(
        create_test_router(),
        post_json(
            "/api/v1/analyze/trajectory",
            json!({ "observations": observations }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Invalid trajectory"));
}

#[tokio::test]
async fn test_analyze_trajectory_invalid_confidence() {
    let (status, body) = send(
        create_test_router(),
        post_json(
            "/api/v1/analyze/trajectory",
            json!({ "observations": [observation(0, 0.0, 0.0, 1.5)] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Validation error"));
}

#[tokio::test]
async fn test_analyze_video_missing_file() {
    let media = tempfile::tempdir().unwrap();
    let (status, body) = send(
        create_media_router(media.path()),
        post_json("/api/v1/analyze/video", json!({ "video_path": "shot001.mp4" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("shot001.mp4"));
}

#[tokio::test]
async fn test_analyze_video_rejects_paths_outside_media_root() {
    let parent = tempfile::tempdir().unwrap();
    let media = parent.path().join("media");
    fs::create_dir(&media).unwrap();
    fs::write(parent.path().join("secret.mp4"), b"not for clients").unwrap();

    let cases = [
        "../secret.mp4".to_string(),
        parent.path().join("secret.mp4").to_string_lossy().into_owned(),
        "/etc/passwd".to_string(),
    ];
    for video_path in cases {
        let (status, body) = send(
            create_media_router(&media),
            post_json("/api/v1/analyze/video", json!({ "video_path": video_path })),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN, "{}", video_path);
        assert!(!body["detail"].as_str().unwrap().contains("secret"));
    }
}

#[tokio::test]
async fn test_analyze_video_rejects_detections_outside_media_root() {
    let parent = tempfile::tempdir().unwrap();
    let media = parent.path().join("media");
    fs::create_dir(&media).unwrap();
    fs::write(media.join("shot001.mp4"), b"video").unwrap();
    fs::write(parent.path().join("detections.json"), b"[]").unwrap();

    let (status, _) = send(
        create_media_router(&media),
        post_json(
            "/api/v1/analyze/video",
            json!({
                "video_path": "shot001.mp4",
                "detections_path": "../detections.json",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_analyze_video_bad_range() {
    let (status, _) = send(
        create_test_router(),
        post_json(
            "/api/v1/analyze/video",
            json!({ "video_path": "shot001.mp4", "start_frame": 10, "end_frame": 2 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_video_missing_detections() {
    let media = tempfile::tempdir().unwrap();
    fs::write(media.path().join("shot001.mp4"), b"video").unwrap();
    let (status, body) = send(
        create_media_router(media.path()),
        post_json(
            "/api/v1/analyze/video",
            json!({
                "video_path": "shot001.mp4",
                "detections_path": "detections.json",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Detections file not found"));
}
