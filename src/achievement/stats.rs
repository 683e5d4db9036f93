use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::UserStats;
use crate::types::ExamAttempt;

const PERFECT_SCORE: f64 = 100.0;
const PERFECT_SCORE_BONUS: u64 = 50;

/// Builds a [`UserStats`] snapshot from raw exam attempts.
///
/// Points are the rounded score of each attempt plus a bonus for perfect
/// scores. Subject mastery is the subject's average score.
pub fn derive_user_stats(history: &[ExamAttempt], now: DateTime<Utc>) -> UserStats {
    if history.is_empty() {
        return UserStats::default();
    }

    let mut total_score = 0.0;
    let mut perfect_scores = 0u32;
    let mut total_study_minutes = 0.0;
    let mut total_points = 0u64;
    let mut per_subject: BTreeMap<String, (f64, u32)> = BTreeMap::new();

    for attempt in history {
        total_score += attempt.score;
        total_study_minutes += attempt.time_taken.max(0.0);

        let is_perfect = attempt.score >= PERFECT_SCORE;
        if is_perfect {
            perfect_scores += 1;
            total_points += PERFECT_SCORE_BONUS;
        }
        total_points += attempt.score.clamp(0.0, PERFECT_SCORE).round() as u64;

        let entry = per_subject.entry(attempt.subject.clone()).or_insert((0.0, 0));
        entry.0 += attempt.score;
        entry.1 += 1;
    }

    let subject_mastery = per_subject
        .into_iter()
        .map(|(subject, (sum, count))| (subject, sum / count as f64))
        .collect();

    let study_days: BTreeSet<NaiveDate> = history
        .iter()
        .map(|a| a.completed_at.date_naive())
        .collect();

    UserStats {
        total_exams: u32::try_from(history.len()).unwrap_or(u32::MAX),
        average_score: total_score / history.len() as f64,
        current_streak: consecutive_days(&study_days, now.date_naive()),
        perfect_scores,
        subject_mastery,
        total_study_minutes,
        total_points,
    }
}

/// Run of consecutive study days ending today or yesterday; 0 otherwise.
pub fn consecutive_days(study_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&latest) = study_days.range(..=today).next_back() else {
        return 0;
    };
    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut streak = 1u32;
    let mut expected = latest - Duration::days(1);
    for day in study_days.range(..latest).rev() {
        if *day != expected {
            break;
        }
        streak += 1;
        expected = expected - Duration::days(1);
    }
    streak
}
