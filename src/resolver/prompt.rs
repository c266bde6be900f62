//! Prompt construction for the completion service.

use crate::agent::{ChatCompletionRequest, ChatMessage, ResponseFormat};
use crate::catalog::Dish;
use crate::selector::{ThresholdTable, Thresholds, DESSERT};
use serde_json::{json, Map, Value};

const SYSTEM_PROMPT: &str = "You are a restaurant assistant. The guest describes in free text what \
they would like to eat. Choose exactly ONE dish from the provided list, taking into account \
tastes, restrictions (no pork, fish, vegetarian, spicy) and any calorie or macro goals. If no \
dish fits exactly, choose the closest one. When the guest asks for the most or the least of \
something, pick the dish at that extreme, using the thresholds given for its category. \
Cite the dish's actual numbers in the reason. Reply with a single JSON object and nothing else.";

const SCHEMA_HINT: &str = r#"Response format:
{
  "choice": "<exact dish name from the list>",
  "reason": "<short explanation>",
  "target_macros": {"calories": null|number, "proteins": null|number, "fats": null|number, "carbs": null|number},
  "match_quality": "perfect"|"good"|"compromise"
}
Set a target macro only when the guest states a number for it; otherwise use null."#;

/// Parameters that shape every completion request.
#[derive(Debug, Clone)]
pub struct PromptSettings {
    pub model: String,
    pub temperature: f32,
    pub json_mode: bool,
}

/// Build the completion request for a query over a pool of candidate dishes.
pub fn build_request(
    settings: &PromptSettings,
    query: &str,
    pool: &[&Dish],
    thresholds: &ThresholdTable,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: settings.model.clone(),
        messages: vec![
            ChatMessage::system(format!("{}\n\n{}", SYSTEM_PROMPT, SCHEMA_HINT)),
            ChatMessage::user(user_message(query, pool, thresholds)),
        ],
        temperature: Some(settings.temperature),
        max_tokens: None,
        response_format: settings.json_mode.then(ResponseFormat::json_object),
    }
}

fn user_message(query: &str, pool: &[&Dish], thresholds: &ThresholdTable) -> String {
    let dishes: Vec<Value> = pool
        .iter()
        .map(|d| {
            json!({
                "name": d.name,
                "category": d.category,
                "diet": d.diet,
                "calories": d.calories,
                "proteins": d.proteins,
                "fats": d.fats,
                "carbs": d.carbs,
                "tags": d.tags,
            })
        })
        .collect();

    format!(
        "Dishes:\n{}\n\nThresholds by category (\"low\" = at most, \"high\" = at least):\n{}\n\nGuest request: {}",
        Value::Array(dishes),
        threshold_table(pool, thresholds),
        json!(query)
    )
}

/// Threshold columns for the categories present in the pool.
fn threshold_table(pool: &[&Dish], thresholds: &ThresholdTable) -> Value {
    let mut table = Map::new();
    for dish in pool {
        let category = dish.category.to_lowercase();
        if table.contains_key(&category) {
            continue;
        }
        let column = if category == DESSERT {
            &thresholds.dessert
        } else {
            &thresholds.mains
        };
        table.insert(category, column_json(column));
    }
    Value::Object(table)
}

fn column_json(column: &Thresholds) -> Value {
    json!({
        "low_calories": column.low_calories,
        "high_calories": column.high_calories,
        "low_proteins": column.low_proteins,
        "high_proteins": column.high_proteins,
        "low_carbs": column.low_carbs,
        "high_carbs": column.high_carbs,
    })
}
