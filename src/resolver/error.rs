//! Error types for intent resolution.

use crate::agent::AgentError;
use crate::intent::{MatchQuality, TargetMacros};
use thiserror::Error;

/// Ways the model-backed resolver can fail. All are recovered by the caller.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Network, timeout or HTTP failure talking to the completion service.
    #[error("Completion service failed: {0}")]
    ExternalService(#[from] AgentError),

    /// The reply is not a JSON object matching the intent schema.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The reply parsed, but names a dish that is not on the menu.
    #[error("Model chose '{choice}', which is not on the menu")]
    InvalidChoice {
        choice: String,
        target_macros: TargetMacros,
        match_quality: Option<MatchQuality>,
    },
}
