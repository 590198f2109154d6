// src/analytics/insight.rs

/// Spread (max - min) above which scores are called inconsistent.
pub const INCONSISTENCY_SPREAD: f64 = 40.0;
/// Below this total XP a learner is considered to be just starting.
pub const EARLY_STAGE_XP: i64 = 200;
/// From this level on a learner is considered highly engaged.
pub const HIGH_ENGAGEMENT_LEVEL: i64 = 3;

pub const DECLINING_TREND: &str =
    "Your accuracy is trending downward. Revisit the topics you missed recently.";
pub const SLOW_GROWTH: &str =
    "You are improving slowly. Regular practice will help you build momentum.";
pub const STEADY_IMPROVEMENT: &str = "Great work! Your accuracy is improving steadily.";
pub const INCONSISTENT_SCORES: &str =
    "Your scores vary a lot between attempts. Aim for more consistent preparation.";
pub const EARLY_STAGE: &str =
    "You are at an early stage. Keep taking quizzes to build experience.";
pub const HIGH_ENGAGEMENT: &str = "Your engagement is high. Keep up the great work!";

/// Produces the commentary for a learner, in fixed rule order.
///
/// Each rule is evaluated on its own:
/// 1. trend: exactly one of declining / slow growth / steady improvement
/// 2. consistency: spread of `accuracies` above 40
/// 3. experience: early stage (< 200 XP), otherwise high engagement at level 3+
///
/// Returns nothing when fewer than 2 accuracy observations exist.
pub fn generate_insights(
    velocity: f64,
    accuracies: &[f64],
    total_xp: i64,
    level: i64,
) -> Vec<&'static str> {
    if accuracies.len() < 2 {
        return Vec::new();
    }

    let mut insights = Vec::with_capacity(3);

    insights.push(if velocity < 0.0 {
        DECLINING_TREND
    } else if velocity < 1.0 {
        SLOW_GROWTH
    } else {
        STEADY_IMPROVEMENT
    });

    if spread(accuracies) > INCONSISTENCY_SPREAD {
        insights.push(INCONSISTENT_SCORES);
    }

    if total_xp < EARLY_STAGE_XP {
        insights.push(EARLY_STAGE);
    } else if level >= HIGH_ENGAGEMENT_LEVEL {
        insights.push(HIGH_ENGAGEMENT);
    }

    insights
}

fn spread(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}
