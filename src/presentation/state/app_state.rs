use std::sync::Arc;

use crate::application::services::FloorCallService;

#[derive(Clone)]
pub struct AppState {
    pub floor_call_service: Arc<FloorCallService>,
}

impl AppState {
    pub fn new(floor_call_service: Arc<FloorCallService>) -> Self {
        Self { floor_call_service }
    }
}
