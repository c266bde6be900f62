//! Agent factory for creating `CompletionAgent` trait objects from configuration.

use super::{AgentError, CompletionAgent, OpenAiAgent};
use crate::config::LlmConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Create a completion agent from the LLM configuration.
///
/// # Errors
///
/// Returns `AgentError::Configuration` for a blank API key or a base URL
/// that is not http(s).
///
/// # Examples
///
/// ```
/// use dishpick::agent::create_agent;
/// use dishpick::config::LlmConfig;
/// use reqwest::Client;
/// use std::sync::Arc;
///
/// let agent = create_agent(
///     &LlmConfig::default(),
///     "sk-test".to_string(),
///     Arc::new(Client::new()),
/// )
/// .unwrap();
///
/// assert_eq!(agent.name(), "deepseek-chat @ https://api.deepseek.com");
/// ```
pub fn create_agent(
    config: &LlmConfig,
    api_key: String,
    client: Arc<Client>,
) -> Result<Arc<dyn CompletionAgent>, AgentError> {
    if api_key.trim().is_empty() {
        return Err(AgentError::Configuration("API key is empty".to_string()));
    }
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(AgentError::Configuration(format!(
            "base URL must start with http:// or https://, got '{}'",
            config.base_url
        )));
    }

    let name = format!(
        "{} @ {}",
        config.model,
        config.base_url.trim_end_matches('/')
    );

    Ok(Arc::new(OpenAiAgent::new(
        name,
        config.base_url.clone(),
        api_key,
        Duration::from_secs(config.timeout_seconds),
        client,
    )))
}
