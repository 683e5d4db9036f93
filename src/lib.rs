//! # exam-recommender
//!
//! Pure scoring core of the education-management system:
//!
//! - **Exam recommendation** - ranks candidate exams for a student from five
//!   weighted heuristics over historical performance
//! - **Achievements** - recomputes achievement progress and unlocks from a
//!   statistics snapshot, and derives the user's level from total points
//!
//! Neither engine performs I/O; callers supply the student record, the exam
//! catalog and any persisted achievement state, and receive fresh values back.
//!
//! ## Modules
//!
//! - [`recommendation`] - the recommendation engine and its sub-scores
//! - [`achievement`] - achievement catalog, evaluation and leveling
//! - [`config`] - weights, thresholds and environment overrides
//! - [`mock`] - seeded sample data for demos and tests
//! - [`types`] - shared data model
//!
//! ## Example
//!
//! ```rust
//! use exam_recommender::{generate_recommendations, CandidateExam, StudentPerformance};
//!
//! let student: StudentPerformance = serde_json::from_str(
//!     r#"{"studentId": "s1", "averageScore": 72, "preferredSubjects": ["Physics"]}"#,
//! ).unwrap();
//! let exams: Vec<CandidateExam> = serde_json::from_str(
//!     r#"[{"id": "e1", "title": "Optics", "subject": "Physics"}]"#,
//! ).unwrap();
//!
//! let recommendations = generate_recommendations(&student, &exams, 5);
//! assert_eq!(recommendations[0].exam_id, "e1");
//! ```

pub mod achievement;
pub mod config;
pub mod input;
pub mod logging;
pub mod mock;
pub mod recommendation;
pub mod types;

pub use types::*;

pub use config::{AppConfig, ConfigError, RecommendationConfig, ScoreWeights};

pub use recommendation::{generate_recommendations, RecommendationEngine};

pub use achievement::{
    evaluate, evaluate_catalog, level_progress, AchievementDefinition, AchievementEvaluation,
    AchievementState, LevelProgress, UserStats,
};
