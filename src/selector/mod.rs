//! Rule-based dish selection.
//!
//! Deterministic keyword matching over the lowercased query. Used when no
//! language model is configured or when the model fails, and to compute the
//! candidate pool handed to the model. Selection never fails: some dish from
//! the catalog is always returned.

pub mod rules;
pub mod thresholds;

pub use rules::{Direction, Directive};
pub use thresholds::{ThresholdTable, Thresholds, DESSERT};

use crate::catalog::{Catalog, Dish, Macro};
use crate::intent::{IntentResult, MatchQuality};

/// Dishes offered to the resolver for one query.
///
/// Restricted to the category the query names, or the whole catalog when it
/// names none (or names one with no dishes). Never empty.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    pub category: Option<&'static str>,
    pub dishes: Vec<&'a Dish>,
}

impl<'a> CandidatePool<'a> {
    /// First dish of the pool, used when the model names a dish that does not exist.
    pub fn first(&self) -> &'a Dish {
        self.dishes[0]
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

/// Keyword and threshold based selector.
#[derive(Debug, Clone, Default)]
pub struct RuleSelector {
    thresholds: ThresholdTable,
}

impl RuleSelector {
    pub fn new(thresholds: ThresholdTable) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Category restriction alone, falling back to the full catalog.
    pub fn candidate_pool<'a>(&self, query: &str, catalog: &'a Catalog) -> CandidatePool<'a> {
        let q = query.to_lowercase();
        if let Some(category) = rules::detect_category(&q) {
            let dishes: Vec<&Dish> = catalog.in_category(category).collect();
            if !dishes.is_empty() {
                return CandidatePool {
                    category: Some(category),
                    dishes,
                };
            }
        }
        CandidatePool {
            category: None,
            dishes: catalog.all().iter().collect(),
        }
    }

    /// Pick a dish for the query using only local rules.
    pub fn select(&self, query: &str, catalog: &Catalog) -> IntentResult {
        let q = query.to_lowercase();

        let requested = rules::detect_category(&q);
        let (mut pool, category) = narrow(catalog.all().iter().collect(), |d| {
            requested.is_some_and(|c| d.category.eq_ignore_ascii_case(c))
        })
        .map_applied(requested);

        if let Some(diets) = rules::detect_diet(&q) {
            pool = narrow(pool, |d| diets.iter().any(|x| d.diet.eq_ignore_ascii_case(x))).dishes;
        }

        let tags: Vec<&str> = catalog
            .tags()
            .into_iter()
            .filter(|t| !rules::is_rule_keyword(&t.to_lowercase()) && mentions(&q, t))
            .collect();
        if !tags.is_empty() {
            pool = narrow(pool, |d| tags.iter().any(|t| d.has_tag(t))).dishes;
        }

        let directive = rules::detect_directive(&q);
        let target_macros = rules::extract_targets(&q);

        tracing::debug!(
            category = ?category,
            tags = ?tags,
            directive = ?directive.map(|d| d.name),
            pool = pool.len(),
            "Rule-based selection"
        );

        let fallback = catalog.first();
        let (dish, reason, quality) = match directive {
            Some(directive) => self.apply_directive(&pool, category, &directive, fallback),
            None => {
                let dish = pool.first().copied().unwrap_or(fallback);
                let reason = format!(
                    "{} is a good {} at {}",
                    dish.name,
                    scope_noun(category),
                    dish.describe_macro(Macro::Calories)
                );
                (dish, reason, MatchQuality::Good)
            }
        };

        IntentResult {
            choice: dish.name.clone(),
            reason,
            target_macros,
            match_quality: Some(quality),
        }
    }

    fn apply_directive<'a>(
        &self,
        pool: &[&'a Dish],
        category: Option<&str>,
        directive: &Directive,
        fallback: &'a Dish,
    ) -> (&'a Dish, String, MatchQuality) {
        let column = self.thresholds.for_category(category);
        let nutrient = directive.nutrient;
        let filtered: Vec<&Dish> = pool
            .iter()
            .copied()
            .filter(|d| column.admits(directive, d.macro_value(nutrient)))
            .collect();

        if let Some(dish) = extremum(&filtered, directive) {
            let reason = format!(
                "{} is the {} {} here at {}",
                dish.name,
                directive.superlative(),
                scope_noun(category),
                dish.describe_macro(nutrient)
            );
            return (dish, reason, MatchQuality::Perfect);
        }

        let dish = extremum(pool, directive).unwrap_or(fallback);
        let reason = format!(
            "No {} meets the {} threshold of {} {}, so {} comes closest at {}",
            scope_noun(category),
            directive.name,
            column.limit(directive),
            nutrient.unit(),
            dish.name,
            dish.describe_macro(nutrient)
        );
        (dish, reason, MatchQuality::Compromise)
    }
}

/// Result of narrowing a pool: the narrowed pool, or the original when the
/// restriction would leave nothing.
struct Narrowed<'a> {
    dishes: Vec<&'a Dish>,
    applied: bool,
}

impl<'a> Narrowed<'a> {
    fn map_applied(self, category: Option<&'static str>) -> (Vec<&'a Dish>, Option<&'static str>) {
        let category = if self.applied { category } else { None };
        (self.dishes, category)
    }
}

fn narrow<'a>(pool: Vec<&'a Dish>, keep: impl Fn(&Dish) -> bool) -> Narrowed<'a> {
    let narrowed: Vec<&Dish> = pool.iter().copied().filter(|d| keep(d)).collect();
    if narrowed.is_empty() {
        Narrowed {
            dishes: pool,
            applied: false,
        }
    } else {
        Narrowed {
            dishes: narrowed,
            applied: true,
        }
    }
}

/// Max (for `High`) or min (for `Low`) of the directive's macro; first wins on ties.
fn extremum<'a>(pool: &[&'a Dish], directive: &Directive) -> Option<&'a Dish> {
    let nutrient = directive.nutrient;
    pool.iter().copied().fold(None::<&'a Dish>, |best, dish| match best {
        None => Some(dish),
        Some(b) => {
            let better = match directive.direction {
                Direction::High => dish.macro_value(nutrient) > b.macro_value(nutrient),
                Direction::Low => dish.macro_value(nutrient) < b.macro_value(nutrient),
            };
            Some(if better { dish } else { b })
        }
    })
}

/// Whole-word mention of a tag; multi-word tags match as substrings.
fn mentions(query: &str, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    if tag.contains(|c: char| !c.is_alphanumeric()) {
        return query.contains(&tag);
    }
    query
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == tag)
}

fn scope_noun(category: Option<&str>) -> &'static str {
    match category {
        Some("dessert") => "dessert",
        Some("salad") => "salad",
        Some("breakfast") => "breakfast",
        Some("hot") => "hot dish",
        _ => "dish",
    }
}
