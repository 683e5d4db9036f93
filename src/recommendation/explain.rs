use crate::config::RecommendationConfig;
use crate::types::{DifficultyLevel, Priority, ScoreBreakdown};

use super::scoring::SubjectStats;

const NO_HISTORY_SCORE_FLOOR: f64 = 40.0;
const NO_HISTORY_SCORE_PENALTY: f64 = 10.0;
const TREND_SCORE_SPAN: f64 = 20.0;
const DIFFICULTY_SCORE_STEP: f64 = 5.0;

pub const FALLBACK_REASON: &str = "Suitable for your learning goals";
pub const WEAK_AREA_REASON: &str = "Targets your weak areas for improvement";
pub const DIFFICULTY_REASON: &str = "Appropriate difficulty level for your current skill";
pub const SUBJECT_AVERAGE_REASON: &str = "You have been performing well in this subject";

pub fn assign_priority(
    confidence: f64,
    targets_weak_area: bool,
    config: &RecommendationConfig,
) -> Priority {
    if confidence > config.high_priority_confidence || targets_weak_area {
        Priority::High
    } else if confidence > config.medium_priority_confidence {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Expected score on a 0-100 scale.
///
/// Without subject history the overall average, lowered by ten points but
/// never below 40, stands in.
pub fn estimate_score(stats: &SubjectStats, average_score: f64, difficulty: DifficultyLevel) -> f64 {
    let estimate = match stats.average {
        None => (average_score - NO_HISTORY_SCORE_PENALTY).max(NO_HISTORY_SCORE_FLOOR),
        Some(subject_avg) => {
            let trend_adjustment = (stats.trend - 0.5) * TREND_SCORE_SPAN;
            let difficulty_adjustment = (3 - difficulty.ordinal()) as f64 * DIFFICULTY_SCORE_STEP;
            subject_avg + trend_adjustment + difficulty_adjustment
        }
    };
    estimate.clamp(0.0, 100.0)
}

pub fn build_reasons(
    subject: &str,
    breakdown: &ScoreBreakdown,
    stats: &SubjectStats,
    config: &RecommendationConfig,
) -> Vec<String> {
    let thresholds = &config.reasons;
    let mut reasons = Vec::new();

    if breakdown.subject_preference > thresholds.preferred_subject {
        reasons.push(format!("{subject} is one of your preferred subjects"));
    }
    if breakdown.performance_history > thresholds.strong_history {
        reasons.push(format!("Strong performance history in {subject}"));
    }
    if breakdown.weak_area_improvement > thresholds.weak_area {
        reasons.push(WEAK_AREA_REASON.to_string());
    }
    if breakdown.difficulty_progression > thresholds.difficulty {
        reasons.push(DIFFICULTY_REASON.to_string());
    }
    if stats.average.is_some_and(|avg| avg > thresholds.subject_average) {
        reasons.push(SUBJECT_AVERAGE_REASON.to_string());
    }

    if reasons.is_empty() {
        reasons.push(FALLBACK_REASON.to_string());
    }
    reasons
}
