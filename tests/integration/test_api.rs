//! HTTP surface tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use slated::{create_rest_router, AnalyzerConfig, RestApiConfig, Scheduler, Task};

fn test_router() -> axum::Router {
    let scheduler = Arc::new(Scheduler::new(None, &AnalyzerConfig::default()));
    create_rest_router(scheduler, &RestApiConfig::default())
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_schedule_endpoint() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/schedule")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt": "gym at 7am for 2 hours"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(response).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Gym workout");
    assert_eq!(tasks[0].start_time, "7:00 AM");
    assert_eq!(tasks[0].end_time, "9:00 AM");
}

#[tokio::test]
async fn test_schedule_never_errors_on_noise() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/schedule")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt": "%%% ??? !!!"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<Task> = body_json(response).await;
    assert!(!tasks.is_empty());
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = test_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: serde_json::Value = body_json(response).await;
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_api_info_endpoint() {
    let response = test_router()
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let info: serde_json::Value = body_json(response).await;
    assert!(info["endpoints"]["schedule"]["path"]
        .as_str()
        .unwrap()
        .contains("/schedule"));
}
