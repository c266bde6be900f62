//! Intent types shared by the resolver, the rule-based selector and the re-ranker.

use crate::catalog::Macro;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Soft nutritional goal extracted from the user's text.
///
/// Each field is either unset or a finite, non-negative number. Targets are
/// read as upper bounds by the re-ranker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetMacros {
    #[serde(default, deserialize_with = "lenient_macro")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_macro")]
    pub proteins: Option<f64>,
    #[serde(default, deserialize_with = "lenient_macro")]
    pub fats: Option<f64>,
    #[serde(default, deserialize_with = "lenient_macro")]
    pub carbs: Option<f64>,
}

impl TargetMacros {
    /// No targets at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// A target on a single axis.
    pub fn only(m: Macro, value: f64) -> Self {
        let mut target = Self::default();
        target.set(m, value);
        target
    }

    pub fn get(&self, m: Macro) -> Option<f64> {
        match m {
            Macro::Calories => self.calories,
            Macro::Proteins => self.proteins,
            Macro::Fats => self.fats,
            Macro::Carbs => self.carbs,
        }
    }

    pub fn set(&mut self, m: Macro, value: f64) {
        let slot = match m {
            Macro::Calories => &mut self.calories,
            Macro::Proteins => &mut self.proteins,
            Macro::Fats => &mut self.fats,
            Macro::Carbs => &mut self.carbs,
        };
        *slot = Some(value);
    }

    /// True when at least one axis carries a target.
    pub fn is_set(&self) -> bool {
        Macro::ALL.iter().any(|m| self.get(*m).is_some())
    }

    /// Set axes with their targets, in canonical order.
    pub fn iter_set(&self) -> impl Iterator<Item = (Macro, f64)> + '_ {
        Macro::ALL
            .into_iter()
            .filter_map(move |m| self.get(m).map(|v| (m, v)))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMacro {
    Number(f64),
    Text(String),
}

/// Accepts a number, a numeric string, `null`, `""` or an absent field.
/// Negative and non-finite values are rejected.
fn lenient_macro<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = match Option::<RawMacro>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawMacro::Number(n)) => n,
        Some(RawMacro::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("not a number: {:?}", s)))?
        }
    };

    if !value.is_finite() || value < 0.0 {
        return Err(D::Error::custom(format!(
            "macro target must be a finite non-negative number, got {}",
            value
        )));
    }
    Ok(Some(value))
}

/// Coarse confidence label attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    Perfect,
    Good,
    Compromise,
}

impl MatchQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchQuality::Perfect => "perfect",
            MatchQuality::Good => "good",
            MatchQuality::Compromise => "compromise",
        }
    }
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "perfect" => Ok(MatchQuality::Perfect),
            "good" => Ok(MatchQuality::Good),
            "compromise" => Ok(MatchQuality::Compromise),
            _ => Err(format!("Invalid match quality: {}", s)),
        }
    }
}

/// A dish choice with its justification, produced once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub choice: String,
    pub reason: String,
    #[serde(default, deserialize_with = "nullable_targets")]
    pub target_macros: TargetMacros,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_quality: Option<MatchQuality>,
}

fn nullable_targets<'de, D>(deserializer: D) -> Result<TargetMacros, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TargetMacros>::deserialize(deserializer)?.unwrap_or_default())
}
