//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub dishes: usize,
    pub llm_enabled: bool,
    pub uptime_seconds: u64,
}

/// GET /health - Return service status.
///
/// The service can always answer from its rules, so it reports "ok" whether
/// or not a model is configured.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        dishes: state.recommender.catalog().len(),
        llm_enabled: state.recommender.llm_enabled(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
