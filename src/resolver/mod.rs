//! Model-backed intent resolution.
//!
//! Sends the guest's query and a pool of candidate dishes to an external
//! chat completion service and turns the reply into an [`IntentResult`].
//! A single attempt is made per query; every failure is reported as a
//! [`ResolveError`] for the caller to recover from.

pub mod error;
pub mod prompt;

pub use error::ResolveError;
pub use prompt::PromptSettings;

use crate::agent::CompletionAgent;
use crate::catalog::Catalog;
use crate::config::LlmConfig;
use crate::intent::IntentResult;
use crate::selector::{CandidatePool, ThresholdTable};
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves a query to a dish through a [`CompletionAgent`].
pub struct IntentResolver {
    agent: Arc<dyn CompletionAgent>,
    settings: PromptSettings,
    thresholds: ThresholdTable,
}

impl IntentResolver {
    pub fn new(
        agent: Arc<dyn CompletionAgent>,
        settings: PromptSettings,
        thresholds: ThresholdTable,
    ) -> Self {
        Self {
            agent,
            settings,
            thresholds,
        }
    }

    /// Build a resolver using the model settings from configuration.
    pub fn from_config(
        agent: Arc<dyn CompletionAgent>,
        config: &LlmConfig,
        thresholds: ThresholdTable,
    ) -> Self {
        let settings = PromptSettings {
            model: config.model.clone(),
            temperature: config.temperature,
            json_mode: config.json_mode,
        };
        Self::new(agent, settings, thresholds)
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Ask the model to pick one dish from `pool` for `query`.
    ///
    /// The chosen name is checked against the whole `catalog`, so a model
    /// that picks a real dish outside the pool is still accepted.
    pub async fn resolve(
        &self,
        query: &str,
        pool: &CandidatePool<'_>,
        catalog: &Catalog,
    ) -> Result<IntentResult, ResolveError> {
        let request = prompt::build_request(&self.settings, query, &pool.dishes, &self.thresholds);

        debug!(
            agent = %self.agent.name(),
            pool = pool.len(),
            category = ?pool.category,
            "Sending intent request"
        );

        let response = self.agent.complete(request).await?;
        let content = response
            .first_content()
            .ok_or_else(|| ResolveError::MalformedResponse("reply has no content".to_string()))?;

        let mut intent = parse_reply(content)?;

        match canonical_name(catalog, &intent.choice) {
            Some(name) => intent.choice = name.to_string(),
            None => {
                return Err(ResolveError::InvalidChoice {
                    choice: intent.choice,
                    target_macros: intent.target_macros,
                    match_quality: intent.match_quality,
                })
            }
        }

        info!(
            agent = %self.agent.name(),
            choice = %intent.choice,
            match_quality = ?intent.match_quality,
            "Model resolved intent"
        );

        Ok(intent)
    }
}

/// Parse the JSON object embedded in a model reply.
///
/// Models sometimes wrap the object in prose or code fences, so the text
/// between the first `{` and the last `}` is taken.
pub fn parse_reply(content: &str) -> Result<IntentResult, ResolveError> {
    let start = content.find('{');
    let end = content.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(ResolveError::MalformedResponse(
                "no JSON object in reply".to_string(),
            ))
        }
    };

    let intent: IntentResult =
        serde_json::from_str(json).map_err(|e| ResolveError::MalformedResponse(e.to_string()))?;

    if intent.choice.trim().is_empty() {
        return Err(ResolveError::MalformedResponse(
            "choice is empty".to_string(),
        ));
    }
    Ok(intent)
}

/// Catalog spelling of a model-supplied name, ignoring case and surrounding whitespace.
fn canonical_name<'a>(catalog: &'a Catalog, choice: &str) -> Option<&'a str> {
    let choice = choice.trim();
    catalog
        .lookup(choice)
        .or_else(|| {
            catalog
                .all()
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(choice))
        })
        .map(|d| d.name.as_str())
}
