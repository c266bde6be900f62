//! OpenAI-compatible agent implementation.

use super::{AgentError, ChatCompletionRequest, ChatCompletionResponse, CompletionAgent};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Agent for OpenAI-compatible chat completion APIs (OpenAI, DeepSeek).
///
/// Sends `POST {base_url}/v1/chat/completions` with Bearer authentication
/// and a per-request timeout. No retries are made.
pub struct OpenAiAgent {
    /// Human-readable name
    name: String,
    /// Base URL without trailing slash (e.g., "https://api.deepseek.com")
    base_url: String,
    /// API key for Bearer authentication
    api_key: String,
    /// Deadline for a single completion call
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

impl OpenAiAgent {
    pub fn new(
        name: String,
        base_url: String,
        api_key: String,
        timeout: Duration,
        client: Arc<Client>,
    ) -> Self {
        Self {
            name,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            client,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionAgent for OpenAiAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError> {
        let timeout_ms = self.timeout.as_millis() as u64;

        let response = self
            .client
            .post(self.completions_url())
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout(timeout_ms)
                } else {
                    AgentError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                AgentError::Timeout(timeout_ms)
            } else {
                AgentError::Network(format!("Failed to read response body: {}", e))
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            AgentError::InvalidResponse(format!("Failed to parse completion response: {}", e))
        })
    }
}
