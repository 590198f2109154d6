// src/analytics/stagnation.rs

use std::{fmt, str::FromStr};

use serde::Serialize;

/// Index above which a learner is flagged at risk.
pub const STAGNATION_THRESHOLD: f64 = 5.0;
/// Topics strictly below this accuracy count as weak.
pub const WEAK_TOPIC_ACCURACY: f64 = 50.0;

/// Which stagnation index formula to apply.
///
/// Two revisions of the dashboard disagree: the overall view weighs in the
/// number of weak topics, the per-topic view does not. Neither is treated as
/// canonical; deployments choose one and the report states which was used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StagnationFormula {
    /// `0.5 * growthDrop + 0.3 * weaknessScore + 0.2 * |velocity|`
    #[default]
    Weighted,
    /// `0.5 * growthDrop + 0.2 * |velocity|`
    TrendOnly,
}

impl FromStr for StagnationFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(Self::Weighted),
            "trend_only" => Ok(Self::TrendOnly),
            other => Err(format!(
                "unknown formula '{}', expected 'weighted' or 'trend_only'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StagnationLabel {
    #[serde(rename = "High Stagnation Risk")]
    HighRisk,
    #[serde(rename = "Stable Learning Growth")]
    Stable,
}

impl fmt::Display for StagnationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StagnationLabel::HighRisk => write!(f, "High Stagnation Risk"),
            StagnationLabel::Stable => write!(f, "Stable Learning Growth"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StagnationAssessment {
    pub index: f64,
    pub label: StagnationLabel,
    pub formula: StagnationFormula,
}

/// Number of topics with accuracy strictly below 50.
pub fn weakness_score(topic_accuracies: &[f64]) -> usize {
    topic_accuracies
        .iter()
        .filter(|&&accuracy| accuracy < WEAK_TOPIC_ACCURACY)
        .count()
}

pub fn classify(
    formula: StagnationFormula,
    growth_drop: f64,
    velocity: f64,
    topic_accuracies: &[f64],
) -> StagnationAssessment {
    let trend_part = 0.5 * growth_drop + 0.2 * velocity.abs();
    let index = match formula {
        StagnationFormula::Weighted => {
            trend_part + 0.3 * weakness_score(topic_accuracies) as f64
        }
        StagnationFormula::TrendOnly => trend_part,
    };

    let label = if index > STAGNATION_THRESHOLD {
        StagnationLabel::HighRisk
    } else {
        StagnationLabel::Stable
    };

    StagnationAssessment {
        index,
        label,
        formula,
    }
}
