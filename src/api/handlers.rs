//! REST API request handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::extract::Task;
use crate::scheduler::Scheduler;

/// Application state shared across handlers.
pub struct ApiState {
    /// Scheduling orchestrator.
    pub scheduler: Arc<Scheduler>,
}

impl ApiState {
    /// Create new API state.
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self { scheduler }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Schedule request.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRequest {
    /// Free-text scheduling request.
    pub prompt: String,
}

/// Health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============================================================================
// Handler Functions
// ============================================================================

/// POST /schedule - Convert a prompt into calendar tasks.
///
/// This endpoint never fails: unparsable input degrades to a single
/// generic task, so the response is always a non-empty task list.
pub async fn schedule_handler(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ScheduleRequest>,
) -> Json<Vec<Task>> {
    info!(prompt = %request.prompt, "received scheduling request");
    let tasks = state.scheduler.schedule(&request.prompt).await;
    Json(tasks)
}

/// GET /health - Liveness probe.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
