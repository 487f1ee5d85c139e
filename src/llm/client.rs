use super::types::*;
use crate::{Result, config::LlmConfig, error::ProviderError};
use async_openai::types::{
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one multimodal user turn and returns the raw completion text.
    async fn complete(&self, content: MultimodalContent) -> Result<String>;
}

/// Client for OpenAI-compatible chat completion endpoints (Fireworks by default).
///
/// Talks HTTP through `reqwest` directly so that a rejected call keeps the
/// provider's raw error body for diagnosis.
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(config: LlmConfig) -> Self {
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key: config.api_key,
            model: config.model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self, content: &MultimodalContent) -> Result<CreateChatCompletionRequest> {
        let message = content.to_openai_message()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .response_format(ResponseFormat::JsonObject)
            .build()?;

        Ok(request)
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            ProviderError::Unreachable(e.to_string())
        }
    }
}

/// Pulls `choices[0].message.content` out of a chat completion body.
pub fn extract_completion(body: &str) -> std::result::Result<String, ProviderError> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.pointer("/choices/0/message/content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::MalformedEnvelope {
            body: body.to_string(),
        })
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, content: MultimodalContent) -> Result<String> {
        debug!(
            "Creating chat completion with {} image segments",
            content.image_count()
        );

        let request = self.build_request(&content)?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            error!("AI provider error ({}): {}", status, body);
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        debug!("Received chat completion body of {} bytes", body.len());

        let completion = extract_completion(&body).inspect_err(|_| {
            error!("AI provider response lacks completion text: {}", body);
        })?;

        Ok(completion)
    }
}
