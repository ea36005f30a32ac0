//! REST API router and configuration.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{health_handler, schedule_handler, ApiState};
use crate::scheduler::Scheduler;

/// REST API configuration.
#[derive(Debug, Clone)]
pub struct RestApiConfig {
    /// Enable CORS.
    pub enable_cors: bool,
    /// Allowed origins for CORS.
    pub cors_origins: Vec<String>,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Create the REST API router.
///
/// Endpoints:
/// - POST /schedule - Convert a free-text prompt into calendar tasks
/// - GET  /health   - Liveness probe
/// - GET  /api      - API description
pub fn create_rest_router(scheduler: Arc<Scheduler>, config: &RestApiConfig) -> Router {
    let state = Arc::new(ApiState::new(scheduler));

    let router = Router::new()
        .route("/schedule", post(schedule_handler))
        .route("/health", get(health_handler))
        .route("/api", get(api_info_handler))
        .with_state(state);

    // Front-ends are served from arbitrary origins, so CORS stays wide
    // open by default.
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}

/// API info handler.
async fn api_info_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "slated REST API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Natural-language scheduling backend",
        "endpoints": {
            "schedule": {
                "method": "POST",
                "path": "/schedule",
                "description": "Convert a free-text scheduling request into calendar tasks",
                "body": {
                    "prompt": "Free-text request (required)"
                }
            },
            "health": {
                "method": "GET",
                "path": "/health",
                "description": "Liveness probe"
            }
        }
    }))
}
