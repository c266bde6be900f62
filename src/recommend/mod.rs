//! Recommendation orchestrator.
//!
//! One pass per query, no retries:
//!
//! ```text
//! resolve intent -> validate choice -> (targets set?) re-rank -> assemble
//! ```
//!
//! Every failure below the orchestrator is absorbed here. A non-empty query
//! always yields a dish from the catalog; the degraded paths are reported
//! through [`Recommendation::fallback_reason`] instead of errors.

mod outcome;

pub use outcome::{FallbackReason, Recommendation, RecommendError, Source};

use crate::catalog::{Catalog, Dish, Macro};
use crate::intent::{IntentResult, MatchQuality, TargetMacros};
use crate::logging::truncate_query;
use crate::rerank::rerank;
use crate::resolver::{IntentResolver, ResolveError};
use crate::selector::RuleSelector;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const APOLOGY: &str =
    "Sorry, something went wrong while choosing a dish. Here is the first dish on our menu.";

/// Intent produced by the first stage, with its provenance.
struct Resolved {
    intent: IntentResult,
    llm_choice: String,
    source: Source,
    fallback: Option<FallbackReason>,
}

/// Runs the recommendation pipeline over a shared, read-only catalog.
pub struct Recommender {
    catalog: Arc<Catalog>,
    selector: RuleSelector,
    resolver: Option<IntentResolver>,
    query_preview: Option<usize>,
}

impl Recommender {
    /// Build a recommender. Without a resolver every query is answered by the rules.
    pub fn new(
        catalog: Arc<Catalog>,
        selector: RuleSelector,
        resolver: Option<IntentResolver>,
    ) -> Self {
        Self {
            catalog,
            selector,
            resolver,
            query_preview: None,
        }
    }

    /// Log query text, truncated to `max_chars`, alongside each recommendation.
    pub fn with_query_logging(mut self, max_chars: usize) -> Self {
        self.query_preview = Some(max_chars);
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn llm_enabled(&self) -> bool {
        self.resolver.is_some()
    }

    /// Recommend a dish for a free-text query.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::EmptyQuery`] when the query is empty after
    /// trimming. No other input produces an error.
    pub async fn recommend(&self, query: &str) -> Result<Recommendation, RecommendError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RecommendError::EmptyQuery);
        }

        let start = Instant::now();
        let recommendation = match AssertUnwindSafe(self.run(query)).catch_unwind().await {
            Ok(recommendation) => recommendation,
            Err(_) => {
                error!("Recommendation pipeline panicked; serving terminal fallback");
                self.terminal_fallback()
            }
        };
        let elapsed = start.elapsed();

        metrics::histogram!("dishpick_recommend_duration_seconds").record(elapsed.as_secs_f64());
        metrics::counter!(
            "dishpick_recommendations_total",
            "source" => recommendation.source.as_str(),
            "degraded" => if recommendation.degraded { "true" } else { "false" },
        )
        .increment(1);
        if let Some(reason) = recommendation.fallback_reason {
            metrics::counter!("dishpick_fallbacks_total", "reason" => reason.as_str()).increment(1);
        }

        match self.query_preview {
            Some(max) => info!(
                query = %truncate_query(query, max),
                dish = %recommendation.dish.name,
                source = %recommendation.source,
                degraded = recommendation.degraded,
                elapsed_ms = elapsed.as_millis() as u64,
                "Recommendation served"
            ),
            None => info!(
                dish = %recommendation.dish.name,
                source = %recommendation.source,
                degraded = recommendation.degraded,
                elapsed_ms = elapsed.as_millis() as u64,
                "Recommendation served"
            ),
        }

        Ok(recommendation)
    }

    async fn run(&self, query: &str) -> Recommendation {
        let Resolved {
            intent,
            llm_choice,
            mut source,
            mut fallback,
        } = self.resolve_intent(query).await;

        let IntentResult {
            choice,
            mut reason,
            target_macros,
            match_quality,
        } = intent;

        let mut dish = match self.catalog.lookup(&choice) {
            Some(dish) => dish,
            None => {
                warn!(
                    choice = %choice,
                    fallback_reason = %FallbackReason::CatalogMiss,
                    "Choice not in catalog; using first dish"
                );
                fallback = fallback.or(Some(FallbackReason::CatalogMiss));
                source = Source::Fallback;
                self.catalog.first()
            }
        };

        let mut quality = match_quality;
        if target_macros.is_set() {
            let ranked = rerank(&self.catalog, &target_macros);
            if ranked.dish.name != dish.name {
                debug!(
                    from = %dish.name,
                    to = %ranked.dish.name,
                    score = ranked.score,
                    "Re-ranker replaced choice"
                );
                reason = format!(
                    "{} Adjusted to {} to stay within {}: it has {}.",
                    reason.trim_end(),
                    ranked.dish.name,
                    describe_targets(&target_macros),
                    describe_actuals(ranked.dish, &target_macros)
                );
            }
            quality = quality.or(Some(if ranked.score == 0.0 {
                MatchQuality::Perfect
            } else {
                MatchQuality::Compromise
            }));
            dish = ranked.dish;
        }

        let degraded = fallback.is_some_and(|r| r.is_degradation());

        Recommendation {
            dish: dish.clone(),
            llm_choice,
            reason,
            used_target_macros: target_macros,
            match_quality: quality.unwrap_or(MatchQuality::Good),
            related_dishes: self.catalog.related(dish).into_iter().cloned().collect(),
            source,
            degraded,
            fallback_reason: fallback,
        }
    }

    async fn resolve_intent(&self, query: &str) -> Resolved {
        let Some(resolver) = &self.resolver else {
            return self.by_rules(query, FallbackReason::ModelDisabled);
        };

        let pool = self.selector.candidate_pool(query, &self.catalog);
        match resolver.resolve(query, &pool, &self.catalog).await {
            Ok(intent) => Resolved {
                llm_choice: intent.choice.clone(),
                intent,
                source: Source::Model,
                fallback: None,
            },
            Err(ResolveError::InvalidChoice {
                choice,
                target_macros,
                match_quality,
            }) => {
                let substitute = pool.first();
                warn!(
                    choice = %choice,
                    substitute = %substitute.name,
                    fallback_reason = %FallbackReason::InvalidChoice,
                    "Model chose a dish that is not on the menu"
                );
                let quality = if target_macros.is_set() {
                    match_quality
                } else {
                    Some(MatchQuality::Compromise)
                };
                Resolved {
                    intent: IntentResult {
                        choice: substitute.name.clone(),
                        reason: format!(
                            "{} is not on the menu, so we suggest {} at {}.",
                            choice,
                            substitute.name,
                            substitute.describe_macro(Macro::Calories)
                        ),
                        target_macros,
                        match_quality: quality,
                    },
                    llm_choice: choice,
                    source: Source::Fallback,
                    fallback: Some(FallbackReason::InvalidChoice),
                }
            }
            Err(e) => {
                let reason = match e {
                    ResolveError::ExternalService(_) => FallbackReason::ExternalService,
                    _ => FallbackReason::MalformedResponse,
                };
                warn!(
                    agent = %resolver.agent_name(),
                    error = %e,
                    fallback_reason = %reason,
                    "Intent resolution failed; using rules"
                );
                self.by_rules(query, reason)
            }
        }
    }

    fn by_rules(&self, query: &str, reason: FallbackReason) -> Resolved {
        let intent = self.selector.select(query, &self.catalog);
        Resolved {
            llm_choice: intent.choice.clone(),
            intent,
            source: Source::Rules,
            fallback: Some(reason),
        }
    }

    fn terminal_fallback(&self) -> Recommendation {
        let dish = self.catalog.first().clone();
        Recommendation {
            llm_choice: dish.name.clone(),
            reason: APOLOGY.to_string(),
            used_target_macros: TargetMacros::none(),
            match_quality: MatchQuality::Compromise,
            related_dishes: Vec::new(),
            source: Source::Fallback,
            degraded: true,
            fallback_reason: Some(FallbackReason::InternalError),
            dish,
        }
    }
}

fn describe_targets(target: &TargetMacros) -> String {
    target
        .iter_set()
        .map(|(m, v)| m.describe(v))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_actuals(dish: &Dish, target: &TargetMacros) -> String {
    target
        .iter_set()
        .map(|(m, _)| dish.describe_macro(m))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::types::Choice;
    use crate::agent::{
        AgentError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionAgent,
    };
    use crate::resolver::PromptSettings;
    use crate::selector::ThresholdTable;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Reply(String),
        Fail,
        Panic,
    }

    struct FakeAgent {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl FakeAgent {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionAgent for FakeAgent {
        fn name(&self) -> &str {
            "fake"
        }

        async fn complete(
            &self,
            _request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Reply(text) => Ok(ChatCompletionResponse {
                    id: "fake".to_string(),
                    model: "fake".to_string(),
                    choices: vec![Choice {
                        index: 0,
                        message: ChatMessage {
                            role: "assistant".to_string(),
                            content: Some(text.clone()),
                        },
                        finish_reason: None,
                    }],
                    usage: None,
                }),
                Behavior::Fail => Err(AgentError::Network("connection refused".to_string())),
                Behavior::Panic => panic!("agent exploded"),
            }
        }
    }

    fn with_agent(agent: Arc<dyn CompletionAgent>) -> Recommender {
        let resolver = IntentResolver::new(
            agent,
            PromptSettings {
                model: "fake".to_string(),
                temperature: 0.3,
                json_mode: true,
            },
            ThresholdTable::default(),
        );
        Recommender::new(
            Arc::new(Catalog::builtin()),
            RuleSelector::default(),
            Some(resolver),
        )
    }

    fn rules_only() -> Recommender {
        Recommender::new(Arc::new(Catalog::builtin()), RuleSelector::default(), None)
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_calling_model() {
        let agent = FakeAgent::new(Behavior::Fail);
        let recommender = with_agent(agent.clone());

        assert_eq!(
            recommender.recommend("   \n").await.unwrap_err(),
            RecommendError::EmptyQuery
        );
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn model_choice_is_used() {
        let agent = FakeAgent::new(Behavior::Reply(
            r#"{"choice": "Greek Salad", "reason": "Fresh and light at 240 kcal", "target_macros": null, "match_quality": "good"}"#
                .to_string(),
        ));
        let rec = with_agent(agent).recommend("a fresh salad").await.unwrap();

        assert_eq!(rec.dish.name, "Greek Salad");
        assert_eq!(rec.llm_choice, "Greek Salad");
        assert_eq!(rec.source, Source::Model);
        assert!(!rec.degraded);
        assert_eq!(rec.fallback_reason, None);
        assert_eq!(rec.match_quality, MatchQuality::Good);
    }

    #[tokio::test]
    async fn unreachable_model_equals_rules() {
        let queries = [
            "dessert, high calories",
            "something light",
            "high protein please",
            "surprise me",
            "dinner under 300 kcal",
        ];
        let degraded = with_agent(FakeAgent::new(Behavior::Fail));
        let baseline = rules_only();

        for query in queries {
            let a = degraded.recommend(query).await.unwrap();
            let b = baseline.recommend(query).await.unwrap();
            assert_eq!(a.dish, b.dish, "query: {}", query);
            assert_eq!(a.reason, b.reason, "query: {}", query);
            assert_eq!(a.match_quality, b.match_quality, "query: {}", query);
            assert_eq!(a.fallback_reason, Some(FallbackReason::ExternalService));
            assert!(a.degraded);
            assert!(!b.degraded);
        }
    }

    #[tokio::test]
    async fn malformed_reply_equals_selector_output() {
        let agent = FakeAgent::new(Behavior::Reply("Sorry, I cannot help.".to_string()));
        let rec = with_agent(agent)
            .recommend("dessert, high calories")
            .await
            .unwrap();
        let selected = RuleSelector::default().select("dessert, high calories", &Catalog::builtin());

        assert_eq!(rec.dish.name, selected.choice);
        assert_eq!(rec.dish.name, "Cheesecake");
        assert_eq!(rec.reason, selected.reason);
        assert_eq!(rec.source, Source::Rules);
        assert_eq!(rec.fallback_reason, Some(FallbackReason::MalformedResponse));
    }

    #[tokio::test]
    async fn invalid_choice_uses_first_of_pool() {
        let agent = FakeAgent::new(Behavior::Reply(
            r#"{"choice": "Tiramisu", "reason": "classic"}"#.to_string(),
        ));
        let rec = with_agent(agent).recommend("something sweet").await.unwrap();

        // The pool for a dessert query starts with Cheesecake, not the catalog's first dish.
        assert_eq!(rec.dish.name, "Cheesecake");
        assert_eq!(rec.llm_choice, "Tiramisu");
        assert_eq!(rec.source, Source::Fallback);
        assert_eq!(rec.fallback_reason, Some(FallbackReason::InvalidChoice));
        assert_eq!(rec.match_quality, MatchQuality::Compromise);
        assert!(rec.degraded);
    }

    #[tokio::test]
    async fn invalid_choice_keeps_model_targets() {
        let agent = FakeAgent::new(Behavior::Reply(
            r#"{"choice": "Tiramisu", "reason": "light", "target_macros": {"calories": 200}}"#
                .to_string(),
        ));
        let rec = with_agent(agent).recommend("a light dessert").await.unwrap();

        assert_eq!(rec.used_target_macros.calories, Some(200.0));
        assert_eq!(rec.dish.name, "Fruit Salad");
        assert_eq!(rec.match_quality, MatchQuality::Perfect);
    }

    #[tokio::test]
    async fn targets_rerank_across_whole_catalog() {
        let agent = FakeAgent::new(Behavior::Reply(
            r#"{"choice": "Chicken with Vegetables", "reason": "fish is not listed", "target_macros": {"calories": 250}}"#
                .to_string(),
        ));
        let rec = with_agent(agent).recommend("low-calorie fish").await.unwrap();

        assert_eq!(rec.llm_choice, "Chicken with Vegetables");
        assert_eq!(rec.dish.name, "Steamed Fish");
        assert_eq!(rec.match_quality, MatchQuality::Perfect);
        assert!(rec.reason.contains("Adjusted to Steamed Fish"));
        assert!(rec.reason.contains("220 kcal"));
    }

    #[tokio::test]
    async fn model_quality_survives_rerank() {
        let agent = FakeAgent::new(Behavior::Reply(
            r#"{"choice": "Cheesecake", "reason": "x", "target_macros": {"calories": 100}, "match_quality": "good"}"#
                .to_string(),
        ));
        let rec = with_agent(agent).recommend("cake").await.unwrap();

        assert_eq!(rec.dish.name, "Fruit Salad");
        assert_eq!(rec.match_quality, MatchQuality::Good);
    }

    #[tokio::test]
    async fn selector_quality_kept_after_rerank() {
        let rec = rules_only().recommend("dinner under 100 kcal").await.unwrap();

        assert_eq!(rec.used_target_macros.calories, Some(100.0));
        assert_eq!(rec.dish.name, "Fruit Salad");
        assert_eq!(rec.match_quality, MatchQuality::Good);
    }

    #[tokio::test]
    async fn related_dishes_are_resolved() {
        let rec = rules_only().recommend("surprise me").await.unwrap();

        assert_eq!(rec.dish.name, "Chicken with Vegetables");
        assert_eq!(rec.related_names(), vec!["Caesar Salad", "Steamed Fish"]);
        assert_eq!(rec.source, Source::Rules);
        assert_eq!(rec.fallback_reason, Some(FallbackReason::ModelDisabled));
        assert!(!rec.degraded);
    }

    #[tokio::test]
    async fn panic_in_pipeline_serves_first_dish() {
        let rec = with_agent(FakeAgent::new(Behavior::Panic))
            .recommend("anything")
            .await
            .unwrap();

        assert_eq!(rec.dish.name, "Chicken with Vegetables");
        assert_eq!(rec.reason, APOLOGY);
        assert!(rec.related_dishes.is_empty());
        assert_eq!(rec.fallback_reason, Some(FallbackReason::InternalError));
        assert_eq!(rec.source, Source::Fallback);
    }

    #[tokio::test]
    async fn every_answer_is_on_the_menu() {
        let recommender = with_agent(FakeAgent::new(Behavior::Reply(
            r#"{"choice": "Pizza", "reason": "?", "target_macros": {"proteins": "40"}}"#.to_string(),
        )));
        let catalog = Catalog::builtin();

        for query in ["pizza", "vegan breakfast", "keto", "x", "ice cream dessert"] {
            let rec = recommender.recommend(query).await.unwrap();
            assert!(catalog.contains(&rec.dish.name), "query: {}", query);
        }
    }

    #[test]
    fn describe_targets_lists_set_axes() {
        let mut target = TargetMacros::only(Macro::Calories, 250.0);
        target.set(Macro::Proteins, 30.0);
        assert_eq!(describe_targets(&target), "250 kcal, 30 g protein");

        let dish: Dish = Catalog::builtin().lookup("Steamed Fish").unwrap().clone();
        assert_eq!(describe_actuals(&dish, &target), "220 kcal, 28 g protein");
    }
}
