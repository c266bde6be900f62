//! Output formatting helpers for CLI commands

use crate::catalog::Dish;
use crate::intent::MatchQuality;
use crate::recommend::Recommendation;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format the menu as a table
pub fn format_dishes_table(dishes: &[Dish]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Dish", "Category", "Diet", "kcal", "Protein", "Fat", "Carbs", "Goes with",
    ]);

    for d in dishes {
        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(&d.category),
            Cell::new(&d.diet),
            Cell::new(d.calories),
            Cell::new(d.proteins),
            Cell::new(d.fats),
            Cell::new(d.carbs),
            Cell::new(d.recommendations.join(", ")),
        ]);
    }

    table.to_string()
}

/// Format the menu as JSON
pub fn format_dishes_json(dishes: &[Dish]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "dishes": dishes }))
}

/// Format a recommendation as JSON
pub fn format_recommendation_json(rec: &Recommendation) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rec)
}

/// Format a recommendation for a terminal
pub fn format_recommendation(rec: &Recommendation) -> String {
    let d = &rec.dish;
    let mut out = format!(
        "{} {}\n  {}\n  {} kcal · {} g protein · {} g fat · {} g carbs\n  {} {}",
        "→".green(),
        d.name.bold(),
        rec.reason,
        d.calories,
        d.proteins,
        d.fats,
        d.carbs,
        "match:".dimmed(),
        quality_label(rec.match_quality),
    );

    if rec.used_target_macros.is_set() {
        let targets: Vec<String> = rec
            .used_target_macros
            .iter_set()
            .map(|(m, v)| m.describe(v))
            .collect();
        out.push_str(&format!("\n  {} {}", "targets:".dimmed(), targets.join(", ")));
    }

    if !rec.related_dishes.is_empty() {
        out.push_str(&format!(
            "\n  {} {}",
            "goes well with:".dimmed(),
            rec.related_names().join(", ")
        ));
    }

    if let Some(reason) = rec.fallback_reason {
        let note = format!("answered by {} ({})", rec.source, reason);
        if rec.degraded {
            out.push_str(&format!("\n  {}", note.yellow()));
        } else {
            out.push_str(&format!("\n  {}", note.dimmed()));
        }
    }

    out
}

/// Coloured match quality label
pub fn quality_label(quality: MatchQuality) -> String {
    match quality {
        MatchQuality::Perfect => "perfect".green().to_string(),
        MatchQuality::Good => "good".cyan().to_string(),
        MatchQuality::Compromise => "compromise".yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::intent::TargetMacros;
    use crate::recommend::{FallbackReason, Source};

    fn recommendation() -> Recommendation {
        let catalog = Catalog::builtin();
        let dish = catalog.lookup("Steamed Fish").unwrap().clone();
        Recommendation {
            related_dishes: catalog.related(&dish).into_iter().cloned().collect(),
            dish,
            llm_choice: "Steamed Fish".to_string(),
            reason: "Only 220 kcal".to_string(),
            used_target_macros: TargetMacros::only(crate::catalog::Macro::Calories, 250.0),
            match_quality: MatchQuality::Perfect,
            source: Source::Rules,
            degraded: true,
            fallback_reason: Some(FallbackReason::ExternalService),
        }
    }

    #[test]
    fn test_format_dishes_table_lists_every_dish() {
        let catalog = Catalog::builtin();
        let table = format_dishes_table(catalog.all());
        for name in catalog.all().iter().map(|d| d.name.as_str()) {
            assert!(table.contains(name), "missing {}", name);
        }
        assert!(table.contains("Goes with"));
    }

    #[test]
    fn test_format_dishes_json() {
        let catalog = Catalog::builtin();
        let json = format_dishes_json(&catalog.all()[..2]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["dishes"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["dishes"][1]["name"], "Steamed Fish");
    }

    #[test]
    fn test_format_recommendation_pretty() {
        colored::control::set_override(false);
        let out = format_recommendation(&recommendation());

        assert!(out.contains("Steamed Fish"));
        assert!(out.contains("Only 220 kcal"));
        assert!(out.contains("match: perfect"));
        assert!(out.contains("targets: 250 kcal"));
        assert!(out.contains("goes well with: Greek Salad, Fruit Salad"));
        assert!(out.contains("answered by rules (external_service)"));
    }

    #[test]
    fn test_format_recommendation_json() {
        let json = format_recommendation_json(&recommendation()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["dish"]["name"], "Steamed Fish");
        assert_eq!(parsed["fallback_reason"], "external_service");
        assert_eq!(parsed["used_target_macros"]["calories"], 250.0);
    }
}
