//! Property-Based Tests for the Recommendation Engine
//!
//! Tests the following invariants:
//! - Confidence floor: every returned recommendation has confidence > 0.3
//! - Confidence bound: confidence stays within [0, 1]
//! - Limit: output length <= limit and <= number of candidates
//! - Ordering: confidence is non-increasing along the output
//! - Reasons: every recommendation carries at least one reason
//! - Determinism: identical inputs give identical output
//! - Batch: parallel batch output equals per-student output

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use exam_recommender::{
    CandidateExam, DifficultyLevel, ExamAttempt, RecommendationEngine, StudentPerformance,
    StudyPattern,
};

const SUBJECTS: &[&str] = &["Mathematics", "Physics", "Chemistry", "Biology", "History"];
const TOPICS: &[&str] = &[
    "Algebra",
    "Mechanics",
    "Organic Chemistry",
    "Inorganic Chemistry",
    "Genetics",
    "World Wars",
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 12, 0, 0).unwrap()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_subject() -> impl Strategy<Value = String> {
    prop::sample::select(SUBJECTS).prop_map(str::to_string)
}

fn arb_topics() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(TOPICS).prop_map(str::to_string), 0..4)
}

fn arb_difficulty() -> impl Strategy<Value = DifficultyLevel> {
    prop_oneof![
        Just(DifficultyLevel::Easy),
        Just(DifficultyLevel::Medium),
        Just(DifficultyLevel::Hard),
    ]
}

fn arb_attempt() -> impl Strategy<Value = ExamAttempt> {
    (
        arb_subject(),
        (-20.0f64..=120.0f64), // scores outside 0-100 are tolerated
        (0i64..=40i64),        // days ago
        arb_difficulty(),
        arb_topics(),
    )
        .prop_map(|(subject, score, days_ago, difficulty, topics)| ExamAttempt {
            exam_id: format!("{subject}-{days_ago}"),
            subject,
            score,
            time_taken: 45.0,
            difficulty,
            topics,
            completed_at: now() - Duration::days(days_ago),
        })
}

fn arb_student() -> impl Strategy<Value = StudentPerformance> {
    (
        prop::collection::vec(arb_attempt(), 0..12),
        prop::sample::subsequence(SUBJECTS.to_vec(), 0..=3),
        prop::sample::subsequence(TOPICS.to_vec(), 0..=2),
        (0.0f64..=100.0f64),
    )
        .prop_map(|(mut history, preferred, weak, average_score)| {
            history.sort_by_key(|a| a.completed_at);
            StudentPerformance {
                student_id: "prop-student".to_string(),
                exam_history: history,
                preferred_subjects: preferred.into_iter().map(str::to_string).collect(),
                weak_areas: weak.into_iter().map(str::to_string).collect(),
                strong_areas: vec![],
                average_score,
                study_pattern: StudyPattern::Irregular,
            }
        })
}

fn arb_exam() -> impl Strategy<Value = CandidateExam> {
    (
        arb_subject(),
        proptest::option::of(arb_difficulty()),
        proptest::option::of(10u32..=300u32),
        proptest::option::of(20u32..=500u32),
        proptest::option::of(arb_topics()),
    )
        .prop_map(|(subject, difficulty, duration, total_marks, topics)| CandidateExam {
            id: String::new(),
            title: format!("{subject} paper"),
            subject,
            difficulty,
            duration,
            total_marks,
            topics,
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<CandidateExam>> {
    prop::collection::vec(arb_exam(), 0..15).prop_map(|mut exams| {
        for (i, exam) in exams.iter_mut().enumerate() {
            exam.id = format!("exam-{i}");
        }
        exams
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_output_invariants(
        student in arb_student(),
        exams in arb_catalog(),
        limit in 0usize..10,
    ) {
        let engine = RecommendationEngine::default();
        let recs = engine.generate_recommendations_at(&student, &exams, limit, now());

        prop_assert!(recs.len() <= limit);
        prop_assert!(recs.len() <= exams.len());
        for rec in &recs {
            prop_assert!(rec.confidence > 0.3);
            prop_assert!(rec.confidence <= 1.0);
            prop_assert!(!rec.reasons.is_empty());
            prop_assert!((0.0..=100.0).contains(&rec.estimated_score));
        }
        for pair in recs.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn prop_deterministic(student in arb_student(), exams in arb_catalog()) {
        let engine = RecommendationEngine::default();
        let first = engine.generate_recommendations_at(&student, &exams, 10, now());
        let second = engine.generate_recommendations_at(&student, &exams, 10, now());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_kept_exactly_when_above_floor(student in arb_student(), exams in arb_catalog()) {
        let engine = RecommendationEngine::default();
        let recs = engine.generate_recommendations_at(&student, &exams, usize::MAX, now());
        let expected = exams
            .iter()
            .filter(|exam| engine.score_exam(&student, exam, now()).confidence > 0.3)
            .count();
        prop_assert_eq!(recs.len(), expected);
    }

    #[test]
    fn prop_batch_matches_single(
        students in prop::collection::vec(arb_student(), 0..4),
        exams in arb_catalog(),
    ) {
        let engine = RecommendationEngine::default();
        let batch = engine.recommend_batch(&students, &exams, 5, now());
        prop_assert_eq!(batch.len(), students.len());
        for (student, result) in students.iter().zip(&batch) {
            let single = engine.generate_recommendations_at(student, &exams, 5, now());
            prop_assert_eq!(&result.recommendations, &single);
        }
    }
}
