// src/analytics/topics.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::attempt::AttemptRecord;

/// Totals for one topic across a user's attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStat {
    pub topic: String,
    pub correct: i64,
    pub total: i64,
    /// `correct / total * 100`, rounded to 2 decimals.
    pub accuracy: f64,
}

/// Folds the per-topic tallies of every attempt into one stat per topic.
///
/// Topics whose summed total is zero are left out. Output is sorted by topic name.
pub fn aggregate_topics(attempts: &[AttemptRecord]) -> Vec<TopicStat> {
    let mut totals: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

    for attempt in attempts {
        for (topic, tally) in attempt.topics.iter() {
            let entry = totals.entry(topic.as_str()).or_default();
            entry.0 += i64::from(tally.correct);
            entry.1 += i64::from(tally.total);
        }
    }

    totals
        .into_iter()
        .filter(|(_, (_, total))| *total > 0)
        .map(|(topic, (correct, total))| TopicStat {
            topic: topic.to_string(),
            correct,
            total,
            accuracy: round2(correct as f64 / total as f64 * 100.0),
        })
        .collect()
}

/// Rounds half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::attempt;

    #[test]
    fn sums_tallies_across_attempts() {
        let attempts = vec![
            attempt(1, 3, 5, &[("Loops", 1, 2), ("Recursion", 2, 3)]),
            attempt(2, 4, 5, &[("Loops", 2, 2), ("Algorithms", 2, 3)]),
        ];

        let stats = aggregate_topics(&attempts);
        let loops = stats.iter().find(|s| s.topic == "Loops").unwrap();
        assert_eq!((loops.correct, loops.total), (3, 4));
        assert_eq!(loops.accuracy, 75.0);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn matches_direct_summation_in_any_order() {
        let mut attempts = vec![
            attempt(1, 1, 3, &[("A", 1, 3)]),
            attempt(2, 2, 3, &[("A", 0, 1), ("B", 2, 2)]),
            attempt(3, 3, 4, &[("B", 1, 2), ("A", 2, 2)]),
        ];
        let forward = aggregate_topics(&attempts);
        attempts.reverse();
        let backward = aggregate_topics(&attempts);
        assert_eq!(forward, backward);

        let a = forward.iter().find(|s| s.topic == "A").unwrap();
        assert_eq!((a.correct, a.total), (1 + 0 + 2, 3 + 1 + 2));
    }

    #[test]
    fn excludes_topics_with_zero_total() {
        let attempts = vec![attempt(1, 1, 1, &[("Empty", 0, 0), ("Loops", 1, 1)])];
        let stats = aggregate_topics(&attempts);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].topic, "Loops");
    }

    #[test]
    fn half_correct_is_exactly_fifty() {
        let attempts = vec![attempt(1, 1, 2, &[("Loops", 1, 2)])];
        assert_eq!(aggregate_topics(&attempts)[0].accuracy, 50.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let attempts = vec![attempt(1, 1, 3, &[("Loops", 1, 3)])];
        assert_eq!(aggregate_topics(&attempts)[0].accuracy, 33.33);
    }
}
