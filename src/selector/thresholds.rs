//! Per-category nutrition thresholds for the directive rules.

use super::rules::{Direction, Directive};
use crate::catalog::Macro;
use serde::Serialize;

/// Category whose thresholds differ from the main-dish column.
pub const DESSERT: &str = "dessert";

/// One column of the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub low_calories: f64,
    pub high_calories: f64,
    pub low_proteins: f64,
    pub high_proteins: f64,
    pub low_carbs: f64,
    pub high_carbs: f64,
}

impl Thresholds {
    /// Threshold for a directive: an upper bound for `Low`, a lower bound for `High`.
    pub fn limit(&self, directive: &Directive) -> f64 {
        match (directive.nutrient, directive.direction) {
            (Macro::Calories, Direction::Low) => self.low_calories,
            (Macro::Calories, Direction::High) => self.high_calories,
            (Macro::Proteins, Direction::Low) => self.low_proteins,
            (Macro::Proteins, Direction::High) => self.high_proteins,
            (Macro::Carbs, Direction::Low) => self.low_carbs,
            (Macro::Carbs, Direction::High) => self.high_carbs,
            // No fat directives exist; never filter on them.
            (Macro::Fats, Direction::Low) => f64::INFINITY,
            (Macro::Fats, Direction::High) => 0.0,
        }
    }

    /// True when `value` satisfies the directive's threshold.
    pub fn admits(&self, directive: &Directive, value: f64) -> bool {
        let limit = self.limit(directive);
        match directive.direction {
            Direction::Low => value <= limit,
            Direction::High => value >= limit,
        }
    }
}

/// The canonical threshold table: main dishes and desserts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdTable {
    pub mains: Thresholds,
    pub dessert: Thresholds,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            mains: Thresholds {
                low_calories: 350.0,
                high_calories: 500.0,
                low_proteins: 15.0,
                high_proteins: 25.0,
                low_carbs: 20.0,
                high_carbs: 50.0,
            },
            dessert: Thresholds {
                low_calories: 350.0,
                high_calories: 400.0,
                low_proteins: 5.0,
                high_proteins: 8.0,
                low_carbs: 30.0,
                high_carbs: 40.0,
            },
        }
    }
}

impl ThresholdTable {
    /// Column for a category; anything but dessert, or no category, uses mains.
    pub fn for_category(&self, category: Option<&str>) -> &Thresholds {
        match category {
            Some(c) if c.eq_ignore_ascii_case(DESSERT) => &self.dessert,
            _ => &self.mains,
        }
    }
}
