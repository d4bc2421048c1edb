use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub professionals: usize,
    pub profile_mode: crate::services::profile_editor::EditorMode,
}

/// Health check endpoint - public
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        professionals: state.listings.source().len(),
        profile_mode: state.profile.lock().mode(),
    })
}
