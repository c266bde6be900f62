//! Completion agent abstraction.
//!
//! This module provides the `CompletionAgent` trait used by the intent
//! resolver to talk to an external chat completion service, and the
//! OpenAI-compatible implementation used for OpenAI and DeepSeek.

use async_trait::async_trait;

pub mod error;
pub mod factory;
pub mod openai;
pub mod types;

pub use error::AgentError;
pub use factory::create_agent;
pub use openai::OpenAiAgent;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};

/// Interface to an external chat completion service.
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn CompletionAgent>`,
/// which also lets tests substitute a fake service.
///
/// # Cancellation Safety
///
/// Dropping the future aborts the in-flight HTTP request.
#[async_trait]
pub trait CompletionAgent: Send + Sync + 'static {
    /// Human-readable name for logging (e.g., "deepseek-chat @ api.deepseek.com").
    fn name(&self) -> &str;

    /// Execute a single non-streaming chat completion.
    ///
    /// # Returns
    ///
    /// - `Ok(ChatCompletionResponse)` on success
    /// - `Err(AgentError::Upstream)` if the service returned an error status
    /// - `Err(AgentError::Network)` if the connection failed
    /// - `Err(AgentError::Timeout)` if the request exceeded its deadline
    /// - `Err(AgentError::InvalidResponse)` if the body is not a chat completion
    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError>;
}
