//! Shared test utilities for Dishpick integration tests.
//!
//! Provides catalogs, fake completion agents and app builders to reduce
//! duplication across test files.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use dishpick::agent::types::Choice;
use dishpick::agent::{
    AgentError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionAgent,
};
use dishpick::api::{create_router, AppState};
use dishpick::catalog::{Catalog, Dish};
use dishpick::config::DishpickConfig;
use dishpick::metrics::PrometheusBuilder;
use dishpick::recommend::Recommender;
use dishpick::resolver::{IntentResolver, PromptSettings};
use dishpick::selector::{RuleSelector, ThresholdTable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// =============================================================================
// Catalog Builders
// =============================================================================

/// Create a dish with no tags and no related dishes.
pub fn make_dish(
    name: &str,
    category: &str,
    diet: &str,
    calories: f64,
    proteins: f64,
    fats: f64,
    carbs: f64,
) -> Dish {
    Dish {
        name: name.to_string(),
        category: category.to_string(),
        diet: diet.to_string(),
        calories,
        proteins,
        fats,
        carbs,
        tags: vec![],
        image_url: String::new(),
        recommendations: vec![],
    }
}

/// The six-dish menu the service first launched with.
pub fn six_dish_catalog() -> Catalog {
    let mut chicken = make_dish("Chicken with Vegetables", "hot", "regular", 450.0, 35.0, 14.0, 40.0);
    chicken.tags = vec!["chicken".to_string(), "no pork".to_string()];
    chicken.recommendations = vec!["Caesar Salad".to_string()];

    let mut fish = make_dish("Steamed Fish", "hot", "dietary", 220.0, 28.0, 6.0, 2.0);
    fish.tags = vec!["fish".to_string(), "light".to_string(), "gluten-free".to_string()];

    Catalog::from_dishes(vec![
        chicken,
        fish,
        make_dish("Buckwheat with Beef", "hot", "hearty", 520.0, 25.0, 12.0, 70.0),
        make_dish("Vegetable Omelette", "breakfast", "vegetarian", 300.0, 18.0, 18.0, 8.0),
        make_dish("Caesar Salad", "salad", "regular", 380.0, 24.0, 22.0, 20.0),
        make_dish("Pasta with Tomatoes", "hot", "vegetarian", 430.0, 14.0, 12.0, 62.0),
    ])
    .unwrap()
}

// =============================================================================
// Fake Completion Agents
// =============================================================================

/// Build a chat completion response whose first choice carries `content`.
pub fn completion_with(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "test-model".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content: Some(content.to_string()),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
    }
}

/// Agent that answers every request with the same reply (or error),
/// recording the requests it receives.
pub struct ScriptedAgent {
    reply: Result<String, AgentError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
}

impl ScriptedAgent {
    pub fn replying(content: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(content.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(error: AgentError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionAgent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.reply {
            Ok(content) => Ok(completion_with(content)),
            Err(e) => Err(e.clone()),
        }
    }
}

// =============================================================================
// Pipeline and App Builders
// =============================================================================

pub fn test_settings() -> PromptSettings {
    PromptSettings {
        model: "test-model".to_string(),
        temperature: 0.3,
        json_mode: true,
    }
}

/// Recommender over `catalog`, backed by `agent` when one is given.
pub fn make_recommender(catalog: Catalog, agent: Option<Arc<dyn CompletionAgent>>) -> Recommender {
    let resolver =
        agent.map(|a| IntentResolver::new(a, test_settings(), ThresholdTable::default()));
    Recommender::new(Arc::new(catalog), RuleSelector::default(), resolver)
}

/// Router around a recommender, with a detached metrics handle.
pub fn make_app(recommender: Recommender) -> axum::Router {
    make_app_with_config(recommender, DishpickConfig::default())
}

pub fn make_app_with_config(recommender: Recommender, config: DishpickConfig) -> axum::Router {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let state = Arc::new(AppState::with_prometheus(
        Arc::new(recommender),
        Arc::new(config),
        handle,
    ));
    create_router(state)
}

/// Read a response body into a string.
pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Read a response body as JSON.
pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}
