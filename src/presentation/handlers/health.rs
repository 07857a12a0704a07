use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::presentation::state::AppState;

/// Liveness probe that also names the configured elevator transport.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub transport: &'static str,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        transport: state.floor_call_service.transport_name(),
    })
}
