use std::sync::Arc;

use crate::application::ports::{
    CommandSender, LlmClient, LlmClientError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AudioClip, DeliveryResult, FloorNumber};

use super::FloorExtractor;

/// Voice request pipeline: transcribe, extract a floor, deliver it.
pub struct FloorCallService {
    transcription_engine: Arc<dyn TranscriptionEngine>,
    floor_extractor: FloorExtractor,
    command_sender: Arc<dyn CommandSender>,
}

impl FloorCallService {
    pub fn new(
        transcription_engine: Arc<dyn TranscriptionEngine>,
        llm_client: Arc<dyn LlmClient>,
        command_sender: Arc<dyn CommandSender>,
    ) -> Self {
        Self {
            transcription_engine,
            floor_extractor: FloorExtractor::new(llm_client),
            command_sender,
        }
    }

    pub fn transport_name(&self) -> &'static str {
        self.command_sender.transport_name()
    }

    pub async fn handle(&self, clip: &AudioClip) -> Result<FloorCallOutcome, FloorCallError> {
        let transcription = self.transcription_engine.transcribe(clip).await?;
        let floor_number = self.floor_extractor.extract(&transcription).await?;

        let delivery = match floor_number {
            Some(floor) => Some(self.dispatch(floor).await),
            None => {
                tracing::info!("No floor number extracted, nothing to deliver");
                None
            }
        };

        Ok(FloorCallOutcome {
            transcription,
            floor_number,
            delivery,
        })
    }

    pub async fn dispatch(&self, floor: FloorNumber) -> DeliveryResult {
        let result = self.command_sender.send(floor).await;
        tracing::info!(
            transport = self.command_sender.transport_name(),
            floor = %floor,
            status = %result.status,
            reply = ?result.reply,
            "Floor delivery finished"
        );
        result
    }
}

#[derive(Debug, Clone)]
pub struct FloorCallOutcome {
    pub transcription: String,
    pub floor_number: Option<FloorNumber>,
    pub delivery: Option<DeliveryResult>,
}

impl FloorCallOutcome {
    pub fn message(&self) -> String {
        match self.floor_number {
            Some(floor) => format!("Extracted floor number: {}", floor),
            None => "Extracted floor number: None".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FloorCallError {
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("floor extraction: {0}")]
    Extraction(#[from] LlmClientError),
}
