//! Keyword rule tables for the rule-based selector.
//!
//! Rules are evaluated in table order and the first match of each kind wins.
//! Queries are matched lowercased, on word boundaries: "cake" matches "cakes"
//! but not "pancake".

use crate::catalog::Macro;
use crate::intent::TargetMacros;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Which end of a macro the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Low,
    High,
}

/// A nutrition directive such as "low calories" or "high protein".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub name: &'static str,
    pub nutrient: Macro,
    pub direction: Direction,
}

impl Directive {
    /// Superlative used in reasons, e.g. "highest-calorie".
    pub fn superlative(&self) -> &'static str {
        match (self.nutrient, self.direction) {
            (Macro::Calories, Direction::Low) => "lowest-calorie",
            (Macro::Calories, Direction::High) => "most filling",
            (Macro::Proteins, Direction::Low) => "lowest-protein",
            (Macro::Proteins, Direction::High) => "highest-protein",
            (Macro::Carbs, Direction::Low) => "lowest-carb",
            (Macro::Carbs, Direction::High) => "highest-carb",
            (Macro::Fats, Direction::Low) => "leanest",
            (Macro::Fats, Direction::High) => "richest",
        }
    }
}

/// What a matched rule does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleEffect {
    /// Restrict the pool to one category.
    Category(&'static str),
    /// Restrict the pool to dishes whose diet is one of these.
    Diet(&'static [&'static str]),
    /// Pick the extremum of a macro, filtered by the threshold table.
    Directive(Directive),
}

/// One row of a rule table: a keyword predicate and its effect.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub effect: RuleEffect,
}

/// A rule with its keywords compiled into one word-boundary pattern.
struct CompiledRule {
    pattern: Regex,
    effect: RuleEffect,
}

impl CompiledRule {
    fn compile(rule: &Rule) -> Self {
        let alternatives: Vec<String> = rule.keywords.iter().map(|k| regex::escape(k)).collect();
        // An optional plural suffix lets "carb" match "carbs" and "calorie" match "calories".
        let pattern = format!(r"\b(?:{})(?:s|es)?\b", alternatives.join("|"));
        Self {
            pattern: Regex::new(&pattern).expect("escaped keyword pattern is valid"),
            effect: rule.effect,
        }
    }
}

/// Every rule in evaluation order: categories, diets, then directives.
static RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    CATEGORY_RULES
        .iter()
        .chain(DIET_RULES)
        .chain(DIRECTIVE_RULES)
        .map(CompiledRule::compile)
        .collect()
});

/// Effect of the first rule whose keywords appear in `query` and that `pick` accepts.
fn first_match<T>(query: &str, pick: impl Fn(RuleEffect) -> Option<T>) -> Option<T> {
    RULES
        .iter()
        .filter_map(|rule| pick(rule.effect).map(|value| (rule, value)))
        .find(|(rule, _)| rule.pattern.is_match(query))
        .map(|(_, value)| value)
}

pub const CATEGORY_RULES: &[Rule] = &[
    Rule {
        keywords: &["dessert", "sweet", "cake"],
        effect: RuleEffect::Category("dessert"),
    },
    Rule {
        keywords: &["breakfast", "morning", "brunch"],
        effect: RuleEffect::Category("breakfast"),
    },
    Rule {
        keywords: &["salad"],
        effect: RuleEffect::Category("salad"),
    },
    Rule {
        keywords: &["hot", "main course", "dinner", "lunch"],
        effect: RuleEffect::Category("hot"),
    },
];

/// Diets that count as meat-free.
pub const MEAT_FREE_DIETS: &[&str] = &["vegetarian", "vegan"];

pub const DIET_RULES: &[Rule] = &[Rule {
    keywords: &["vegetarian", "vegan", "meatless", "no meat", "without meat", "plant-based"],
    effect: RuleEffect::Diet(MEAT_FREE_DIETS),
}];

pub const DIRECTIVE_RULES: &[Rule] = &[
    Rule {
        keywords: &[
            "low calorie", "low-calorie", "low calories", "least calorie", "fewest calorie",
            "light", "diet", "lean",
        ],
        effect: RuleEffect::Directive(Directive {
            name: "low calories",
            nutrient: Macro::Calories,
            direction: Direction::Low,
        }),
    },
    Rule {
        keywords: &[
            "high calorie", "high-calorie", "high calories", "most calorie", "max calorie",
            "hearty", "filling", "caloric",
        ],
        effect: RuleEffect::Directive(Directive {
            name: "high calories",
            nutrient: Macro::Calories,
            direction: Direction::High,
        }),
    },
    Rule {
        keywords: &[
            "high protein", "high-protein", "most protein", "protein-rich", "rich in protein",
            "lots of protein",
        ],
        effect: RuleEffect::Directive(Directive {
            name: "high protein",
            nutrient: Macro::Proteins,
            direction: Direction::High,
        }),
    },
    Rule {
        keywords: &["low protein", "low-protein", "least protein"],
        effect: RuleEffect::Directive(Directive {
            name: "low protein",
            nutrient: Macro::Proteins,
            direction: Direction::Low,
        }),
    },
    Rule {
        keywords: &["low carb", "low-carb", "least carb", "fewest carb", "keto"],
        effect: RuleEffect::Directive(Directive {
            name: "low carbs",
            nutrient: Macro::Carbs,
            direction: Direction::Low,
        }),
    },
    Rule {
        keywords: &["high carb", "high-carb", "most carb", "carb-rich", "energy"],
        effect: RuleEffect::Directive(Directive {
            name: "high carbs",
            nutrient: Macro::Carbs,
            direction: Direction::High,
        }),
    },
];

/// Category named by the query, if any.
pub fn detect_category(query: &str) -> Option<&'static str> {
    first_match(query, |effect| match effect {
        RuleEffect::Category(c) => Some(c),
        _ => None,
    })
}

/// Diet restriction named by the query, if any.
pub fn detect_diet(query: &str) -> Option<&'static [&'static str]> {
    first_match(query, |effect| match effect {
        RuleEffect::Diet(d) => Some(d),
        _ => None,
    })
}

/// Highest-priority nutrition directive in the query, if any.
pub fn detect_directive(query: &str) -> Option<Directive> {
    first_match(query, |effect| match effect {
        RuleEffect::Directive(d) => Some(d),
        _ => None,
    })
}

/// True when `word` is one of the rule keywords, so it is not reused as a tag.
pub fn is_rule_keyword(word: &str) -> bool {
    CATEGORY_RULES
        .iter()
        .chain(DIET_RULES)
        .chain(DIRECTIVE_RULES)
        .flat_map(|r| r.keywords.iter())
        .any(|k| *k == word)
}

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

static NUMERIC_TARGETS: LazyLock<Vec<(Macro, Regex)>> = LazyLock::new(|| {
    [
        (Macro::Calories, format!(r"{}\s*(?:kcal|calories|calorie|cals?)\b", NUMBER)),
        (Macro::Proteins, format!(r"{}\s*(?:g|grams?)\s*(?:of\s+)?proteins?\b", NUMBER)),
        (Macro::Fats, format!(r"{}\s*(?:g|grams?)\s*(?:of\s+)?fats?\b", NUMBER)),
        (Macro::Carbs, format!(r"{}\s*(?:g|grams?)\s*(?:of\s+)?(?:carbs?|carbohydrates?)\b", NUMBER)),
    ]
    .into_iter()
    .map(|(m, pattern)| {
        let regex = Regex::new(&pattern).expect("numeric target pattern is valid");
        (m, regex)
    })
    .collect()
});

/// Explicit numbers tied to a macro, e.g. "under 300 kcal" or "30g protein".
///
/// The first number mentioned for each axis wins.
pub fn extract_targets(query: &str) -> TargetMacros {
    let mut target = TargetMacros::none();
    for (m, regex) in NUMERIC_TARGETS.iter() {
        let value = regex
            .captures(query)
            .and_then(|c| c.get(1))
            .and_then(|v| v.as_str().parse::<f64>().ok())
            .filter(|v| v.is_finite());
        if let Some(v) = value {
            target.set(*m, v);
        }
    }
    target
}
