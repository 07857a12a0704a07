use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use liftcall::application::services::FloorCallService;
use liftcall::infrastructure::audio::OpenAiWhisperEngine;
use liftcall::infrastructure::delivery::CommandSenderFactory;
use liftcall::infrastructure::llm::StreamingLlmClient;
use liftcall::infrastructure::observability::{TracingConfig, init_tracing};
use liftcall::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("loading settings")?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment));

    if settings.transcription.api_key.is_empty() {
        tracing::warn!("No transcription API key configured; set GROQ_API_KEY");
    }

    let transcription_engine = Arc::new(OpenAiWhisperEngine::from_settings(&settings.transcription));
    let llm_client = Arc::new(StreamingLlmClient::from_settings(&settings.llm));
    let command_sender =
        CommandSenderFactory::create(&settings.delivery).context("configuring elevator transport")?;

    let floor_call_service = Arc::new(FloorCallService::new(
        transcription_engine,
        llm_client,
        command_sender,
    ));

    let router = create_router(AppState::new(floor_call_service), &settings.server);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("parsing server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
