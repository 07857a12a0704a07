use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use liftcall::application::ports::{TranscriptionEngine, TranscriptionError};
use liftcall::domain::AudioClip;
use liftcall::infrastructure::audio::OpenAiWhisperEngine;

type CapturedFields = Arc<Mutex<HashMap<String, String>>>;

async fn start_mock_transcription_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, CapturedFields, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured: CapturedFields = Arc::new(Mutex::new(HashMap::new()));

    let app = Router::new()
        .route(
            "/audio/transcriptions",
            post(
                move |State(captured): State<CapturedFields>, mut multipart: Multipart| async move {
                    while let Ok(Some(field)) = multipart.next_field().await {
                        let name = field.name().unwrap_or_default().to_string();
                        let value = match field.file_name() {
                            Some(file_name) => file_name.to_string(),
                            None => field.text().await.unwrap_or_default(),
                        };
                        captured.lock().unwrap().insert(name, value);
                    }
                    let status = StatusCode::from_u16(response_status).unwrap();
                    (status, response_body).into_response()
                },
            ),
        )
        .with_state(Arc::clone(&captured));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

fn engine(base_url: &str) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new(
        "test-key".to_string(),
        base_url.to_string(),
        "whisper-large-v3".to_string(),
        "en".to_string(),
    )
}

fn clip() -> AudioClip {
    AudioClip::from_upload("request.m4a", b"fake audio bytes".to_vec()).unwrap()
}

#[tokio::test]
async fn given_valid_audio_when_transcribing_then_returns_trimmed_text() {
    let (base_url, _, shutdown_tx) =
        start_mock_transcription_server(200, r#"{"text": "  Take me to floor five. "}"#).await;

    let result = engine(&base_url).transcribe(&clip()).await;

    assert_eq!(result.unwrap(), "Take me to floor five.");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_audio_when_transcribing_then_sends_model_language_and_filename() {
    let (base_url, captured, shutdown_tx) =
        start_mock_transcription_server(200, r#"{"text": "floor two"}"#).await;

    engine(&base_url).transcribe(&clip()).await.unwrap();

    let fields = captured.lock().unwrap().clone();
    assert_eq!(fields.get("model").map(String::as_str), Some("whisper-large-v3"));
    assert_eq!(fields.get("language").map(String::as_str), Some("en"));
    assert_eq!(fields.get("response_format").map(String::as_str), Some("json"));
    assert_eq!(fields.get("file").map(String::as_str), Some("request.m4a"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_status_when_transcribing_then_returns_api_error() {
    let (base_url, _, shutdown_tx) =
        start_mock_transcription_server(401, r#"{"error": {"message": "invalid api key"}}"#).await;

    let result = engine(&base_url).transcribe(&clip()).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unexpected_body_when_transcribing_then_returns_invalid_response() {
    let (base_url, _, shutdown_tx) = start_mock_transcription_server(200, "not json").await;

    let result = engine(&base_url).transcribe(&clip()).await;

    assert!(matches!(result, Err(TranscriptionError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}
