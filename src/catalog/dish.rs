//! Dish record and the nutritional macro axes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four nutritional axes a dish is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    Calories,
    Proteins,
    Fats,
    Carbs,
}

impl Macro {
    /// All axes in the canonical order used for scoring and display.
    pub const ALL: [Macro; 4] = [Macro::Calories, Macro::Proteins, Macro::Fats, Macro::Carbs];

    /// Field name as it appears in JSON payloads.
    pub fn field(&self) -> &'static str {
        match self {
            Macro::Calories => "calories",
            Macro::Proteins => "proteins",
            Macro::Fats => "fats",
            Macro::Carbs => "carbs",
        }
    }

    /// Unit suffix used in human-readable reasons.
    pub fn unit(&self) -> &'static str {
        match self {
            Macro::Calories => "kcal",
            _ => "g",
        }
    }

    /// Human-readable amount on this axis, e.g. "460 kcal" or "28 g protein".
    pub fn describe(&self, value: f64) -> String {
        match self {
            Macro::Calories => format!("{} kcal", value),
            Macro::Proteins => format!("{} g protein", value),
            Macro::Fats => format!("{} g fat", value),
            Macro::Carbs => format!("{} g carbs", value),
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// A dish on the menu.
///
/// Dishes are immutable once the [`Catalog`](super::Catalog) is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub category: String,
    pub diet: String,
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    /// Names of up to two related dishes shown alongside this one.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Dish {
    /// Value of the given macro for this dish.
    pub fn macro_value(&self, m: Macro) -> f64 {
        match m {
            Macro::Calories => self.calories,
            Macro::Proteins => self.proteins,
            Macro::Fats => self.fats,
            Macro::Carbs => self.carbs,
        }
    }

    /// True when the dish carries the tag (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Human-readable macro value, e.g. "460 kcal" or "28 g protein".
    pub fn describe_macro(&self, m: Macro) -> String {
        m.describe(self.macro_value(m))
    }
}
