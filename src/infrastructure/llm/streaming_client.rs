use async_trait::async_trait;
use futures::stream::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError, LlmTokenStream};
use crate::presentation::config::LlmSettings;

/// Chat completions client for OpenAI-compatible providers.
pub struct StreamingLlmClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

impl StreamingLlmClient {
    pub fn from_settings(settings: &LlmSettings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.chat_model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
        }
    }

    fn build_request(
        &self,
        system_prompt: &str,
        prompt: &str,
        stream: Option<bool>,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            stream,
        }
    }

    async fn post(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<reqwest::Response, LlmClientError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmClient for StreamingLlmClient {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, LlmClientError> {
        let request_body = self.build_request(system_prompt, prompt, None);
        let response = self.post(&request_body).await?;

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }

    async fn complete_stream(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<LlmTokenStream, LlmClientError> {
        let request_body = self.build_request(system_prompt, prompt, Some(true));
        let response = self.post(&request_body).await?;

        let token_stream = response
            .bytes_stream()
            .scan(Vec::new(), |pending: &mut Vec<u8>, chunk_result| {
                let items = match chunk_result {
                    Ok(bytes) => {
                        pending.extend_from_slice(&bytes);
                        drain_sse_tokens(pending)
                    }
                    Err(e) => vec![Err(LlmClientError::ApiRequestFailed(e.to_string()))],
                };
                futures::future::ready(Some(items))
            })
            .flat_map(futures::stream::iter);

        Ok(Box::pin(token_stream))
    }
}

/// Pulls every complete `data:` line out of `pending`, leaving any partial
/// line buffered for the next chunk.
fn drain_sse_tokens(pending: &mut Vec<u8>) -> Vec<Result<String, LlmClientError>> {
    let mut tokens = Vec::new();
    while let Some(pos) = pending.iter().position(|b| *b == b'\n') {
        let line: Vec<u8> = pending.drain(..=pos).collect();
        let line = String::from_utf8_lossy(&line);
        let Some(data) = line.trim().strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data == "[DONE]" {
            continue;
        }
        match serde_json::from_str::<ChatCompletionChunk>(data) {
            Ok(chunk) => {
                if let Some(content) = chunk
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                {
                    tracing::debug!(chunk = %content, "Streaming chunk");
                    tokens.push(Ok(content));
                }
            }
            Err(e) => tracing::debug!(error = %e, "Skipping unparseable stream event"),
        }
    }
    tokens
}
