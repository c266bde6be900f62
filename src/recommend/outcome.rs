//! Recommendation result types.

use crate::catalog::Dish;
use crate::intent::{MatchQuality, TargetMacros};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The only failure a caller can see: nothing to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("empty query")]
    EmptyQuery,
}

/// Which stage produced the final choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The language model's pick was used.
    Model,
    /// The rule-based selector's pick was used.
    Rules,
    /// A substitute was used (invalid model choice or internal error).
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Model => "model",
            Source::Rules => "rules",
            Source::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the pipeline left its primary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No model is configured; rules are the primary path.
    ModelDisabled,
    ExternalService,
    MalformedResponse,
    InvalidChoice,
    CatalogMiss,
    InternalError,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::ModelDisabled => "model_disabled",
            FallbackReason::ExternalService => "external_service",
            FallbackReason::MalformedResponse => "malformed_response",
            FallbackReason::InvalidChoice => "invalid_choice",
            FallbackReason::CatalogMiss => "catalog_miss",
            FallbackReason::InternalError => "internal_error",
        }
    }

    /// Whether this reason marks the answer as degraded.
    ///
    /// Running without a model is a configured mode, not a degradation.
    pub fn is_degradation(&self) -> bool {
        !matches!(self, FallbackReason::ModelDisabled)
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub dish: Dish,
    /// The name the resolver (or selector) originally picked, before validation and re-ranking.
    pub llm_choice: String,
    pub reason: String,
    pub used_target_macros: TargetMacros,
    pub match_quality: MatchQuality,
    pub related_dishes: Vec<Dish>,
    pub source: Source,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
}

impl Recommendation {
    /// Names of the related dishes, in display order.
    pub fn related_names(&self) -> Vec<String> {
        self.related_dishes.iter().map(|d| d.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_disabled_is_not_degraded() {
        assert!(!FallbackReason::ModelDisabled.is_degradation());
        assert!(FallbackReason::ExternalService.is_degradation());
        assert!(FallbackReason::InternalError.is_degradation());
    }

    #[test]
    fn reasons_serialize_snake_case() {
        let json = serde_json::to_string(&FallbackReason::MalformedResponse).unwrap();
        assert_eq!(json, "\"malformed_response\"");
        assert_eq!(FallbackReason::CatalogMiss.to_string(), "catalog_miss");
        assert_eq!(serde_json::to_string(&Source::Rules).unwrap(), "\"rules\"");
    }

    #[test]
    fn reasons_parse_from_wire_names() {
        let reason: FallbackReason = serde_json::from_str("\"invalid_choice\"").unwrap();
        assert_eq!(reason, FallbackReason::InvalidChoice);
        let source: Source = serde_json::from_str("\"fallback\"").unwrap();
        assert_eq!(source, Source::Fallback);
    }
}
