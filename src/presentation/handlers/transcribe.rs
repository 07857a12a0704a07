use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{AudioClip, FloorNumber};
use crate::presentation::state::AppState;

use super::error_response::error_response;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcription: String,
    pub floor_number: Option<FloorNumber>,
    pub message: String,
    pub tcp_status: Option<String>,
    pub elevator_reply: Option<String>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let clip = match read_audio_upload(&mut multipart).await {
        Ok(clip) => clip,
        Err(response) => return response,
    };

    tracing::info!(
        filename = %clip.filename,
        bytes = clip.size_bytes(),
        "Received audio upload"
    );

    match state.floor_call_service.handle(&clip).await {
        Ok(outcome) => {
            let message = outcome.message();
            let (tcp_status, elevator_reply) = match outcome.delivery {
                Some(result) => (Some(result.status.to_string()), result.reply),
                None => (None, None),
            };
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    transcription: outcome.transcription,
                    floor_number: outcome.floor_number,
                    message,
                    tcp_status,
                    elevator_reply,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error processing audio upload");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing audio: {}", e),
            )
        }
    }
}

async fn read_audio_upload(multipart: &mut Multipart) -> Result<AudioClip, Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                tracing::warn!("Transcribe request with no file");
                return Err(error_response(StatusCode::BAD_REQUEST, "No file uploaded"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read file bytes");
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read file: {}", e),
            )
        })?;

        return AudioClip::from_upload(filename, data.to_vec()).map_err(|ext| {
            tracing::error!(extension = %ext, "Unsupported file extension");
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Unsupported file extension: {}", ext),
            )
        });
    }
}
