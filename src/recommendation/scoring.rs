//! Sub-score functions
//!
//! Each function maps one aspect of a (student, exam) pair onto a value
//! designed to land in [0, 1]. Out-of-range history scores are not clamped
//! here; the engine clamps the aggregated confidence instead.

use chrono::{DateTime, Utc};

use crate::types::{CandidateExam, DifficultyLevel, StudentPerformance, RECENT_ATTEMPT_WINDOW};

// ==================== Constants ====================

/// Returned whenever a signal has no data to work with
pub const NEUTRAL_SCORE: f64 = 0.5;

pub const NOT_PREFERRED_SCORE: f64 = 0.3;
pub const PREFERENCE_RANK_STEP: f64 = 0.15;
pub const PREFERENCE_FLOOR: f64 = 0.5;

pub const HISTORY_AVERAGE_SHARE: f64 = 0.7;
pub const HISTORY_TREND_SHARE: f64 = 0.3;

pub const READY_FOR_HARDER_AVERAGE: f64 = 80.0;
pub const READY_FOR_MEDIUM_AVERAGE: f64 = 60.0;
pub const MATCHED_DIFFICULTY_SCORE: f64 = 0.9;
pub const TOO_EASY_SCORE: f64 = 0.5;
pub const OFF_BAND_SCORE: f64 = 0.6;
pub const TOO_HARD_SCORE: f64 = 0.3;
pub const COLD_START_EASY_SCORE: f64 = 0.8;
pub const COLD_START_OTHER_SCORE: f64 = 0.4;

pub const NO_WEAK_AREA_SCORE: f64 = 0.3;

pub const NEVER_ATTEMPTED_RECENCY: f64 = 0.8;
pub const OPTIMAL_GAP_RECENCY: f64 = 0.9;
pub const MODERATE_GAP_RECENCY: f64 = 0.7;
pub const POOR_GAP_RECENCY: f64 = 0.4;

const HARD_MIN_DURATION: u32 = 180;
const HARD_MIN_MARKS: u32 = 300;
const EASY_MAX_DURATION: u32 = 60;
const EASY_MAX_MARKS: u32 = 100;

// ==================== Subject Statistics ====================

/// Aggregates over a student's attempts in one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub attempts: usize,
    /// Mean over every attempt, `None` without history
    pub average: Option<f64>,
    /// Mean over the last few attempts
    pub recent_average: Option<f64>,
    pub trend: f64,
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl SubjectStats {
    pub fn from_history(student: &StudentPerformance, subject: &str) -> Self {
        let mut scores = Vec::new();
        let mut last_completed_at = None;
        for attempt in student.subject_history(subject) {
            scores.push(attempt.score);
            last_completed_at = Some(attempt.completed_at);
        }

        let recent = &scores[scores.len().saturating_sub(RECENT_ATTEMPT_WINDOW)..];

        Self {
            attempts: scores.len(),
            average: mean(&scores),
            recent_average: mean(recent),
            trend: trend(recent),
            last_completed_at,
        }
    }

    pub fn has_history(&self) -> bool {
        self.attempts > 0
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Direction of the given chronological scores, 0.5 meaning flat.
pub fn trend(recent_scores: &[f64]) -> f64 {
    match (recent_scores.first(), recent_scores.last()) {
        (Some(first), Some(last)) if recent_scores.len() >= 2 => {
            (NEUTRAL_SCORE + (last - first) / 100.0).clamp(0.0, 1.0)
        }
        _ => NEUTRAL_SCORE,
    }
}

// ==================== Difficulty ====================

/// Hard is checked before Easy, so a long exam with few marks is Hard.
pub fn infer_difficulty(duration: u32, total_marks: u32) -> DifficultyLevel {
    if duration > HARD_MIN_DURATION || total_marks > HARD_MIN_MARKS {
        DifficultyLevel::Hard
    } else if duration < EASY_MAX_DURATION || total_marks < EASY_MAX_MARKS {
        DifficultyLevel::Easy
    } else {
        DifficultyLevel::Medium
    }
}

pub fn resolve_difficulty(exam: &CandidateExam) -> DifficultyLevel {
    exam.difficulty
        .unwrap_or_else(|| infer_difficulty(exam.resolved_duration(), exam.resolved_total_marks()))
}

// ==================== Topic Matching ====================

/// Case-insensitive substring match of `topic` against any weak area.
pub fn topic_matches_weak_area(topic: &str, weak_areas: &[String]) -> bool {
    let topic = topic.to_lowercase();
    weak_areas
        .iter()
        .any(|area| topic.contains(&area.to_lowercase()))
}

pub fn targets_weak_area(topics: &[String], weak_areas: &[String]) -> bool {
    topics
        .iter()
        .any(|topic| topic_matches_weak_area(topic, weak_areas))
}

// ==================== Sub-scores ====================

pub fn subject_preference_score(subject: &str, preferred_subjects: &[String]) -> f64 {
    match preferred_subjects.iter().position(|s| s == subject) {
        Some(rank) => (1.0 - rank as f64 * PREFERENCE_RANK_STEP).max(PREFERENCE_FLOOR),
        None => NOT_PREFERRED_SCORE,
    }
}

pub fn performance_history_score(stats: &SubjectStats) -> f64 {
    match stats.average {
        Some(avg) => HISTORY_AVERAGE_SHARE * (avg / 100.0) + HISTORY_TREND_SHARE * stats.trend,
        None => NEUTRAL_SCORE,
    }
}

pub fn difficulty_progression_score(stats: &SubjectStats, difficulty: DifficultyLevel) -> f64 {
    let Some(recent_avg) = stats.recent_average else {
        return if difficulty == DifficultyLevel::Easy {
            COLD_START_EASY_SCORE
        } else {
            COLD_START_OTHER_SCORE
        };
    };

    let level = difficulty.ordinal();
    if recent_avg >= READY_FOR_HARDER_AVERAGE {
        if level >= 2 {
            MATCHED_DIFFICULTY_SCORE
        } else {
            TOO_EASY_SCORE
        }
    } else if recent_avg >= READY_FOR_MEDIUM_AVERAGE {
        if level == 2 {
            MATCHED_DIFFICULTY_SCORE
        } else {
            OFF_BAND_SCORE
        }
    } else if level == 1 {
        MATCHED_DIFFICULTY_SCORE
    } else {
        TOO_HARD_SCORE
    }
}

pub fn weak_area_improvement_score(topics: &[String], weak_areas: &[String]) -> f64 {
    if topics.is_empty() {
        return NO_WEAK_AREA_SCORE;
    }

    let overlap = topics
        .iter()
        .filter(|topic| topic_matches_weak_area(topic, weak_areas))
        .count();
    if overlap == 0 {
        return NO_WEAK_AREA_SCORE;
    }

    let ratio = overlap as f64 / topics.len() as f64;
    0.5 + 0.5 * ratio
}

/// Whole days since the last attempt in the subject, relative to `now`.
pub fn days_since_last_attempt(stats: &SubjectStats, now: DateTime<Utc>) -> Option<i64> {
    stats.last_completed_at.map(|last| (now - last).num_days())
}

pub fn recency_score(stats: &SubjectStats, now: DateTime<Utc>) -> f64 {
    match days_since_last_attempt(stats, now) {
        None => NEVER_ATTEMPTED_RECENCY,
        Some(1..=7) => OPTIMAL_GAP_RECENCY,
        Some(8..=14) => MODERATE_GAP_RECENCY,
        Some(_) => POOR_GAP_RECENCY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExamAttempt, StudyPattern};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn attempt(subject: &str, score: f64, days_ago: i64) -> ExamAttempt {
        ExamAttempt {
            exam_id: format!("{subject}-{days_ago}"),
            subject: subject.to_string(),
            score,
            time_taken: 45.0,
            difficulty: DifficultyLevel::Medium,
            topics: vec![],
            completed_at: now() - Duration::days(days_ago),
        }
    }

    fn student(history: Vec<ExamAttempt>) -> StudentPerformance {
        StudentPerformance {
            student_id: "s1".to_string(),
            exam_history: history,
            preferred_subjects: vec![],
            weak_areas: vec![],
            strong_areas: vec![],
            average_score: 70.0,
            study_pattern: StudyPattern::Consistent,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trend_neutral_below_two_points() {
        assert_eq!(trend(&[]), 0.5);
        assert_eq!(trend(&[90.0]), 0.5);
    }

    #[test]
    fn test_trend_direction_and_clamp() {
        assert!((trend(&[60.0, 70.0, 80.0]) - 0.7).abs() < 1e-9);
        assert!((trend(&[80.0, 60.0]) - 0.3).abs() < 1e-9);
        assert_eq!(trend(&[0.0, 100.0]), 1.0);
        assert_eq!(trend(&[-200.0, 100.0]), 1.0);
        assert_eq!(trend(&[100.0, -200.0]), 0.0);
    }

    #[test]
    fn test_subject_stats_uses_last_three_for_recent() {
        let s = student(vec![
            attempt("Math", 20.0, 40),
            attempt("Physics", 99.0, 30),
            attempt("Math", 60.0, 20),
            attempt("Math", 70.0, 10),
            attempt("Math", 80.0, 5),
        ]);
        let stats = SubjectStats::from_history(&s, "Math");
        assert_eq!(stats.attempts, 4);
        assert!((stats.average.unwrap() - 57.5).abs() < 1e-9);
        assert!((stats.recent_average.unwrap() - 70.0).abs() < 1e-9);
        assert!((stats.trend - 0.7).abs() < 1e-9);
        assert_eq!(stats.last_completed_at, Some(now() - Duration::days(5)));
    }

    #[test]
    fn test_infer_difficulty_hard_checked_first() {
        assert_eq!(infer_difficulty(200, 50), DifficultyLevel::Hard);
        assert_eq!(infer_difficulty(90, 400), DifficultyLevel::Hard);
        assert_eq!(infer_difficulty(30, 100), DifficultyLevel::Easy);
        assert_eq!(infer_difficulty(60, 80), DifficultyLevel::Easy);
        assert_eq!(infer_difficulty(60, 100), DifficultyLevel::Medium);
        assert_eq!(infer_difficulty(180, 300), DifficultyLevel::Medium);
    }

    #[test]
    fn test_resolve_prefers_declared_difficulty() {
        let exam = CandidateExam {
            id: "e".to_string(),
            title: "t".to_string(),
            subject: "Math".to_string(),
            difficulty: Some(DifficultyLevel::Easy),
            duration: Some(240),
            total_marks: None,
            topics: None,
        };
        assert_eq!(resolve_difficulty(&exam), DifficultyLevel::Easy);
    }

    #[test]
    fn test_subject_preference_by_rank() {
        let preferred = strings(&["Physics", "Chemistry", "Math", "Biology", "History"]);
        assert_eq!(subject_preference_score("Physics", &preferred), 1.0);
        assert!((subject_preference_score("Chemistry", &preferred) - 0.85).abs() < 1e-9);
        assert!((subject_preference_score("Math", &preferred) - 0.7).abs() < 1e-9);
        assert_eq!(subject_preference_score("History", &preferred), 0.5);
        assert_eq!(subject_preference_score("Art", &preferred), 0.3);
        assert_eq!(subject_preference_score("physics", &preferred), 0.3);
    }

    #[test]
    fn test_performance_history_blend() {
        let s = student(vec![attempt("Math", 60.0, 9), attempt("Math", 80.0, 2)]);
        let stats = SubjectStats::from_history(&s, "Math");
        // 0.7 * 0.70 + 0.3 * 0.70
        assert!((performance_history_score(&stats) - 0.7).abs() < 1e-9);

        let empty = SubjectStats::from_history(&s, "Art");
        assert_eq!(performance_history_score(&empty), 0.5);
    }

    #[test]
    fn test_difficulty_progression_bands() {
        let strong = SubjectStats::from_history(&student(vec![attempt("M", 85.0, 2)]), "M");
        assert_eq!(difficulty_progression_score(&strong, DifficultyLevel::Hard), 0.9);
        assert_eq!(difficulty_progression_score(&strong, DifficultyLevel::Medium), 0.9);
        assert_eq!(difficulty_progression_score(&strong, DifficultyLevel::Easy), 0.5);

        let middling = SubjectStats::from_history(&student(vec![attempt("M", 65.0, 2)]), "M");
        assert_eq!(difficulty_progression_score(&middling, DifficultyLevel::Medium), 0.9);
        assert_eq!(difficulty_progression_score(&middling, DifficultyLevel::Hard), 0.6);

        let weak = SubjectStats::from_history(&student(vec![attempt("M", 40.0, 2)]), "M");
        assert_eq!(difficulty_progression_score(&weak, DifficultyLevel::Easy), 0.9);
        assert_eq!(difficulty_progression_score(&weak, DifficultyLevel::Hard), 0.3);

        let none = SubjectStats::from_history(&student(vec![]), "M");
        assert_eq!(difficulty_progression_score(&none, DifficultyLevel::Easy), 0.8);
        assert_eq!(difficulty_progression_score(&none, DifficultyLevel::Medium), 0.4);
    }

    #[test]
    fn test_weak_area_scores() {
        let weak = strings(&["organic chemistry", "Calculus"]);
        assert_eq!(weak_area_improvement_score(&[], &weak), 0.3);
        assert_eq!(weak_area_improvement_score(&strings(&["Optics"]), &weak), 0.3);
        assert_eq!(
            weak_area_improvement_score(&strings(&["Organic Chemistry", "Integral Calculus"]), &weak),
            1.0
        );
        assert!(
            (weak_area_improvement_score(&strings(&["Organic Chemistry", "Optics"]), &weak) - 0.75)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_substring_match_false_positive_is_kept() {
        let weak = strings(&["Organic Chemistry"]);
        assert!(topic_matches_weak_area("Inorganic Chemistry", &weak));
    }

    #[test]
    fn test_recency_windows() {
        let cases = [(0, 0.4), (1, 0.9), (7, 0.9), (8, 0.7), (14, 0.7), (15, 0.4), (60, 0.4)];
        for (days_ago, expected) in cases {
            let stats = SubjectStats::from_history(&student(vec![attempt("M", 70.0, days_ago)]), "M");
            assert_eq!(recency_score(&stats, now()), expected, "days_ago={days_ago}");
        }
        let never = SubjectStats::from_history(&student(vec![]), "M");
        assert_eq!(recency_score(&never, now()), 0.8);
    }
}
