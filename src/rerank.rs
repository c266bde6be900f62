//! Macro-based re-ranking.
//!
//! Targets are upper bounds: only the amount by which a dish exceeds a target
//! is penalised, relative to the target itself. A dish below every target
//! scores exactly zero.

use crate::catalog::{Catalog, Dish};
use crate::intent::TargetMacros;

/// A dish together with its excess-over-target score.
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a> {
    pub dish: &'a Dish,
    /// Lower is better, zero is a perfect fit.
    pub score: f64,
}

/// Score a dish against the target macros.
///
/// For each set axis `k`: `max(0, dish[k] - target[k]) / target[k]`, with the
/// divisor replaced by `1.0` when the target is zero. Unset axes contribute
/// nothing.
pub fn score_by_macros(dish: &Dish, target: &TargetMacros) -> f64 {
    target
        .iter_set()
        .map(|(m, t)| {
            let excess = (dish.macro_value(m) - t).max(0.0);
            let scale = if t == 0.0 { 1.0 } else { t };
            excess / scale
        })
        .sum()
}

/// Pick the dish that best fits the targets across the whole catalog.
///
/// Ties go to the dish that appears first in the catalog.
pub fn rerank<'a>(catalog: &'a Catalog, target: &TargetMacros) -> Ranked<'a> {
    let mut best = Ranked {
        dish: catalog.first(),
        score: score_by_macros(catalog.first(), target),
    };

    for dish in catalog.all().iter().skip(1) {
        let score = score_by_macros(dish, target);
        if score < best.score {
            best = Ranked { dish, score };
        }
    }

    tracing::debug!(
        dish = %best.dish.name,
        score = best.score,
        "Re-ranked catalog by target macros"
    );

    best
}
