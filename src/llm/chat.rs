use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::llm::prompts::{preview, user_prompt, SYSTEM_PROMPT};
use crate::llm::provider::{LLMProvider, RawModelResponse};

/// Client for an OpenAI-style `/chat/completions` endpoint.
pub struct ChatCompletionProvider {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatCompletionProvider {
    pub fn new(
        api_key: String,
        api_url: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            api_url: api_url.into(),
            model: model.into(),
            temperature,
        })
    }
}

#[async_trait]
impl LLMProvider for ChatCompletionProvider {
    async fn analyze(&self, text: &str) -> Result<RawModelResponse> {
        if text.trim().is_empty() {
            return Err(Error::Validation("Please provide text to analyze".to_string()));
        }

        tracing::debug!("Analyzing sentiment for text: {}", preview(text, 100));

        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(text),
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Chat completion error ({}): {}", status, preview(&body, 500));
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
                StatusCode::PAYMENT_REQUIRED => Error::QuotaExhausted,
                _ => Error::LLMApi(format!("upstream returned status {}", status.as_u16())),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("unreadable response: {}", e)))?;

        // Missing, null or non-string content all count as no reply.
        let raw_text = body["choices"][0]["message"]["content"]
            .as_str()
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string)
            .ok_or(Error::EmptyResponse)?;

        tracing::debug!("Model response received: {}", preview(&raw_text, 200));
        Ok(RawModelResponse { raw_text })
    }

    fn name(&self) -> &str {
        "ChatCompletion"
    }
}
