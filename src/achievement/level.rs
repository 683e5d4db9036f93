use serde::{Deserialize, Serialize};

const POINTS_PER_LEVEL_UNIT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub total_points: u64,
    /// Points at which the current level started
    pub current_level_xp: u64,
    /// Points at which the next level starts
    pub next_level_xp: u64,
    /// Fraction of the way from `current_level_xp` to `next_level_xp`
    pub progress: f64,
}

/// `floor(sqrt(points / 100)) + 1`
pub fn level_for_points(total_points: u64) -> u32 {
    let mut root = ((total_points as f64) / POINTS_PER_LEVEL_UNIT as f64).sqrt().floor() as u64;
    // Correct the float root at large perfect squares.
    while root > 0 && checked_threshold(root).map_or(true, |t| t > total_points) {
        root -= 1;
    }
    while checked_threshold(root + 1).is_some_and(|t| t <= total_points) {
        root += 1;
    }
    u32::try_from(root + 1).unwrap_or(u32::MAX)
}

fn checked_threshold(level_minus_one: u64) -> Option<u64> {
    level_minus_one
        .checked_mul(level_minus_one)?
        .checked_mul(POINTS_PER_LEVEL_UNIT)
}

fn threshold(level_minus_one: u64) -> u64 {
    checked_threshold(level_minus_one).unwrap_or(u64::MAX)
}

pub fn level_progress(total_points: u64) -> LevelProgress {
    let level = level_for_points(total_points);
    let current_level_xp = threshold(u64::from(level) - 1);
    let next_level_xp = threshold(u64::from(level));
    let span = next_level_xp.saturating_sub(current_level_xp).max(1);

    LevelProgress {
        level,
        total_points,
        current_level_xp,
        next_level_xp,
        progress: total_points.saturating_sub(current_level_xp) as f64 / span as f64,
    }
}
