//! Recommend command implementation

use crate::cli::output::{format_recommendation, format_recommendation_json};
use crate::cli::serve::{build_recommender, load_config};
use crate::cli::RecommendArgs;

/// Handle `dishpick recommend` command
///
/// Runs the full pipeline once, exactly as `POST /recommend` would.
pub async fn handle_recommend(args: &RecommendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    if args.no_llm {
        config.llm.enabled = false;
    }
    config.validate()?;

    let recommender = build_recommender(&config)?;
    let recommendation = recommender.recommend(&args.query).await?;

    if args.json {
        Ok(format_recommendation_json(&recommendation)?)
    } else {
        Ok(format_recommendation(&recommendation))
    }
}
