use std::sync::Arc;

use futures::stream::StreamExt;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::FloorNumber;

pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that extracts floor numbers.";

pub fn extraction_prompt(transcript: &str) -> String {
    format!(
        "You are an assistant that extracts floor numbers from text. \
         Reply only with the floor number as a single digit or 'none' if no number is present.\n\
         Text: \"{}\"\n\
         Return only the number or 'none'.",
        transcript
    )
}

/// Interprets the model's answer. Blank, `none` and anything that is not a
/// plain integer mean no floor was requested.
pub fn parse_floor_reply(raw: &str) -> Option<FloorNumber> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() || normalized == "none" {
        return None;
    }
    normalized.parse().ok()
}

/// Asks a chat model which floor a transcript refers to.
pub struct FloorExtractor {
    llm_client: Arc<dyn LlmClient>,
}

impl FloorExtractor {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    pub async fn extract(&self, transcript: &str) -> Result<Option<FloorNumber>, LlmClientError> {
        let prompt = extraction_prompt(transcript);
        let mut tokens = self
            .llm_client
            .complete_stream(EXTRACTION_SYSTEM_PROMPT, &prompt)
            .await?;

        let mut raw = String::new();
        while let Some(token) = tokens.next().await {
            raw.push_str(&token?);
        }

        let floor = parse_floor_reply(&raw);
        tracing::info!(raw = %raw.trim(), floor = ?floor.map(|f| f.value()), "Floor extraction finished");
        Ok(floor)
    }
}
