// src/analytics/mod.rs

//! Learning analytics over a user's quiz history.
//!
//! Everything here is a pure function of an attempt snapshot that the caller
//! has already loaded. Topic aggregation feeds weakness detection; the
//! (optionally topic-filtered) accuracy series feeds the trend, which in turn
//! feeds stagnation classification and the insight rules. XP and level always
//! use the full, unfiltered history.

pub mod insight;
pub mod stagnation;
pub mod topics;
pub mod trend;
pub mod xp;

use serde::Serialize;

use crate::models::attempt::AttemptRecord;
use stagnation::{StagnationAssessment, StagnationFormula};
use topics::{TopicStat, round2};
use trend::SeriesPoint;

/// Everything the progress dashboard shows for one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub user_id: i64,
    /// Topic the trend was restricted to, if any.
    pub topic: Option<String>,
    /// False when the history could not be loaded.
    pub available: bool,
    pub total_attempts: usize,
    pub series: Vec<SeriesPoint>,
    pub topics: Vec<TopicStat>,
    /// Rounded to 2 decimals. Absent with fewer than 2 observations.
    pub velocity: Option<f64>,
    pub growth_drop: Option<f64>,
    pub stagnation: Option<StagnationAssessment>,
    pub insights: Vec<String>,
    pub total_xp: i64,
    pub level: i64,
}

impl AnalyticsReport {
    /// The report shown when the attempt history is unavailable.
    pub fn unavailable(user_id: i64, topic: Option<String>) -> Self {
        Self {
            available: false,
            ..Self::empty(user_id, topic)
        }
    }

    fn empty(user_id: i64, topic: Option<String>) -> Self {
        Self {
            user_id,
            topic,
            available: true,
            total_attempts: 0,
            series: Vec::new(),
            topics: Vec::new(),
            velocity: None,
            growth_drop: None,
            stagnation: None,
            insights: Vec::new(),
            total_xp: 0,
            level: xp::level_for(0),
        }
    }
}

/// Builds the analytics report for `user_id` from its chronologically ordered attempts.
pub fn build_report(
    user_id: i64,
    attempts: &[AttemptRecord],
    topic: Option<&str>,
    formula: StagnationFormula,
) -> AnalyticsReport {
    let topic_stats = topics::aggregate_topics(attempts);
    let topic_accuracies: Vec<f64> = topic_stats.iter().map(|t| t.accuracy).collect();

    let series = trend::accuracy_series(attempts, topic);
    let accuracies: Vec<f64> = series.iter().map(|p| p.accuracy).collect();

    let total_xp = xp::total_xp(attempts);
    let level = xp::level_for(total_xp);

    let mut report = AnalyticsReport {
        total_attempts: attempts.len(),
        topics: topic_stats,
        total_xp,
        level,
        ..AnalyticsReport::empty(user_id, topic.map(str::to_string))
    };

    if let Some(trend) = trend::analyze_trend(&accuracies) {
        report.velocity = Some(round2(trend.velocity));
        report.growth_drop = Some(round2(trend.growth_drop));
        report.stagnation = Some(stagnation::classify(
            formula,
            trend.growth_drop,
            trend.velocity,
            &topic_accuracies,
        ));
        report.insights = insight::generate_insights(trend.velocity, &accuracies, total_xp, level)
            .into_iter()
            .map(str::to_string)
            .collect();
    }

    report.series = series;
    report
}
