// src/analytics/xp.rs

use crate::{config::XP_PER_LEVEL, models::attempt::AttemptRecord};

/// Sum of XP over every attempt. Never topic-filtered.
pub fn total_xp(attempts: &[AttemptRecord]) -> i64 {
    attempts.iter().map(|a| i64::from(a.xp)).sum()
}

/// Level 1 starts at 0 XP and each further level costs 200 XP.
pub fn level_for(total_xp: i64) -> i64 {
    total_xp.max(0) / XP_PER_LEVEL + 1
}
