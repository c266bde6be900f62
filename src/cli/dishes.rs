//! Dishes command implementation

use crate::catalog::{Catalog, Dish};
use crate::cli::output::{format_dishes_json, format_dishes_table};
use crate::cli::serve::load_config;
use crate::cli::DishesArgs;

/// Handle `dishpick dishes` command
pub fn handle_dishes(args: &DishesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    let catalog = Catalog::load_or_builtin(config.catalog.path.as_deref())?;

    let dishes: Vec<Dish> = match &args.category {
        Some(category) => {
            let filtered: Vec<Dish> = catalog.in_category(category).cloned().collect();
            if filtered.is_empty() {
                return Err(format!(
                    "No dishes in category '{}'. Available: {}",
                    category,
                    catalog.categories().join(", ")
                )
                .into());
            }
            filtered
        }
        None => catalog.all().to_vec(),
    };

    if args.json {
        Ok(format_dishes_json(&dishes)?)
    } else {
        Ok(format_dishes_table(&dishes))
    }
}
