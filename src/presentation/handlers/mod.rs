mod dispatch;
mod error_response;
mod health;
mod transcribe;

pub use dispatch::{DispatchRequest, dispatch_handler};
pub use error_response::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use transcribe::{TranscribeResponse, transcribe_handler};
