use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::domain::{DeliveryResult, FloorNumber};
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    pub floor_number: FloorNumber,
}

/// Delivers a floor number directly, skipping transcription and extraction.
pub async fn dispatch_handler(
    State(state): State<AppState>,
    axum::Extension(request_id): axum::Extension<RequestId>,
    Json(request): Json<DispatchRequest>,
) -> Json<DeliveryResult> {
    tracing::info!(request_id = %request_id.0, floor = %request.floor_number, "Manual floor dispatch");
    Json(state.floor_call_service.dispatch(request.floor_number).await)
}
