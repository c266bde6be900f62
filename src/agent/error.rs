//! Error types for completion agent operations.

use thiserror::Error;

/// Errors that can occur while calling the completion service.
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Service returned an error response (4xx, 5xx).
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body doesn't match the chat completion format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Agent configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
