//! Common Types and Constants
//!
//! Shared data structures consumed and produced by the recommendation engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Exam duration assumed when a candidate exam does not declare one (minutes)
pub const DEFAULT_EXAM_DURATION: u32 = 60;

/// Total marks assumed when a candidate exam does not declare them
pub const DEFAULT_TOTAL_MARKS: u32 = 100;

/// Number of recommendations returned when the caller has no preference
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Number of trailing attempts considered "recent" within a subject
pub const RECENT_ATTEMPT_WINDOW: usize = 3;

// ==================== Student Types ====================

/// Difficulty tier of an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Easy=1, Medium=2, Hard=3
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a student tends to study. Carried for callers; scoring ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyPattern {
    #[default]
    Consistent,
    Irregular,
    Intensive,
    Casual,
}

/// One completed exam in a student's history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAttempt {
    pub exam_id: String,
    pub subject: String,
    /// Score on a 0-100 scale
    pub score: f64,
    /// Minutes spent on the attempt
    pub time_taken: f64,
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub topics: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// Historical performance record for one student
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPerformance {
    pub student_id: String,
    /// Chronological, oldest first
    #[serde(default)]
    pub exam_history: Vec<ExamAttempt>,
    /// Most preferred first
    #[serde(default)]
    pub preferred_subjects: Vec<String>,
    #[serde(default)]
    pub weak_areas: Vec<String>,
    #[serde(default)]
    pub strong_areas: Vec<String>,
    pub average_score: f64,
    #[serde(default)]
    pub study_pattern: StudyPattern,
}

impl StudentPerformance {
    /// Attempts in `subject`, in history order
    pub fn subject_history<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a ExamAttempt> + 'a {
        self.exam_history.iter().filter(move |a| a.subject == subject)
    }
}

// ==================== Exam Types ====================

/// An exam that may be recommended
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateExam {
    pub id: String,
    pub title: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<DifficultyLevel>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
}

impl CandidateExam {
    pub fn resolved_duration(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_EXAM_DURATION)
    }

    pub fn resolved_total_marks(&self) -> u32 {
        self.total_marks.unwrap_or(DEFAULT_TOTAL_MARKS)
    }

    pub fn topics(&self) -> &[String] {
        self.topics.as_deref().unwrap_or(&[])
    }
}

// ==================== Recommendation Types ====================

/// Display tier of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// A ranked suggestion produced by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecommendation {
    pub exam_id: String,
    pub title: String,
    pub subject: String,
    pub difficulty: DifficultyLevel,
    /// Expected score on a 0-100 scale
    pub estimated_score: f64,
    /// Suitability in [0, 1]
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub priority: Priority,
    pub topics: Vec<String>,
    /// Minutes
    pub estimated_duration: u32,
}

/// Per-candidate sub-scores before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub difficulty: DifficultyLevel,
    pub subject_preference: f64,
    pub performance_history: f64,
    pub difficulty_progression: f64,
    pub weak_area_improvement: f64,
    pub recency: f64,
    pub confidence: f64,
}

/// Recommendations for one student in a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecommendations {
    pub student_id: String,
    pub recommendations: Vec<ExamRecommendation>,
}
