//! Language model configuration

use serde::{Deserialize, Serialize};

/// External completion service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// When false, every request is answered by the rule-based selector.
    pub enabled: bool,
    /// OpenAI-compatible API root (e.g., "https://api.openai.com")
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub temperature: f32,
    /// Ask the service for a `json_object` response format
    pub json_mode: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            timeout_seconds: 30,
            temperature: 0.3,
            json_mode: true,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// Returns `None` if the variable is unset or blank.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}
