// src/analytics/trend.rs

use serde::Serialize;

use crate::models::attempt::AttemptRecord;

/// One observation in the accuracy trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub attempt_index: usize,
    pub accuracy: f64,
}

/// Builds the chronological accuracy series.
///
/// Without a topic this is each attempt's overall accuracy. With a topic, the
/// accuracy is recomputed from that topic's tally and attempts that did not
/// cover the topic are dropped rather than counted as zero.
pub fn accuracy_series(attempts: &[AttemptRecord], topic: Option<&str>) -> Vec<SeriesPoint> {
    match topic {
        None => attempts
            .iter()
            .map(|a| SeriesPoint {
                attempt_index: a.attempt_index,
                accuracy: a.accuracy,
            })
            .collect(),
        Some(topic) => attempts
            .iter()
            .filter_map(|a| {
                let tally = a.topics.get(topic)?;
                (tally.total > 0).then(|| SeriesPoint {
                    attempt_index: a.attempt_index,
                    accuracy: f64::from(tally.correct) / f64::from(tally.total) * 100.0,
                })
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Mean slope between the first and last observation.
    pub velocity: f64,
    /// `first - last`; positive means accuracy fell.
    pub growth_drop: f64,
}

/// Computes the trend of an accuracy series, or `None` with fewer than 2 points.
///
/// The slope is `(last - first) / (n - 1)`, not a regression fit.
pub fn analyze_trend(accuracies: &[f64]) -> Option<Trend> {
    let (first, last) = match accuracies {
        [first, .., last] => (*first, *last),
        _ => return None,
    };
    let steps = (accuracies.len() - 1) as f64;

    Some(Trend {
        velocity: (last - first) / steps,
        growth_drop: first - last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::attempt;

    #[test]
    fn velocity_is_endpoint_slope() {
        let trend = analyze_trend(&[40.0, 60.0, 80.0]).unwrap();
        assert_eq!(trend.velocity, 20.0);
        assert_eq!(trend.growth_drop, -40.0);
    }

    #[test]
    fn ignores_interior_points() {
        let a = analyze_trend(&[50.0, 0.0, 100.0, 70.0]).unwrap();
        let b = analyze_trend(&[50.0, 90.0, 10.0, 70.0]).unwrap();
        assert_eq!(a, b);
        assert!((a.velocity - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn undefined_below_two_observations() {
        assert_eq!(analyze_trend(&[]), None);
        assert_eq!(analyze_trend(&[75.0]), None);
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let series = [30.0, 45.5, 20.0, 66.6];
        assert_eq!(analyze_trend(&series), analyze_trend(&series));
    }

    #[test]
    fn non_decreasing_series_has_non_negative_velocity() {
        for series in [
            vec![10.0, 10.0],
            vec![0.0, 20.0, 20.0, 100.0],
            vec![55.0, 60.0, 60.0, 60.0, 61.0],
        ] {
            assert!(analyze_trend(&series).unwrap().velocity >= 0.0);
        }
    }

    #[test]
    fn topic_series_recomputes_and_drops_missing() {
        let attempts = vec![
            attempt(1, 4, 5, &[("Loops", 1, 2), ("Recursion", 3, 3)]),
            attempt(2, 3, 3, &[("Recursion", 3, 3)]),
            attempt(3, 2, 4, &[("Loops", 2, 2), ("Recursion", 0, 2)]),
        ];

        let series = accuracy_series(&attempts, Some("Loops"));
        assert_eq!(
            series,
            vec![
                SeriesPoint {
                    attempt_index: 1,
                    accuracy: 50.0,
                },
                SeriesPoint {
                    attempt_index: 3,
                    accuracy: 100.0,
                },
            ]
        );

        let overall = accuracy_series(&attempts, None);
        assert_eq!(overall.len(), 3);
        assert_eq!(overall[0].accuracy, 80.0);
    }
}
