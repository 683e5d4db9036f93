//! Achievement and Level Scoring
//!
//! Achievement definitions are immutable static data. Evaluation takes the
//! caller's previously persisted states plus a statistics snapshot and returns
//! fresh states; nothing is mutated in place, so one catalog can serve any
//! number of concurrent callers.

pub mod catalog;
pub mod level;
pub mod stats;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use catalog::ACHIEVEMENTS;
pub use level::{level_for_points, level_progress, LevelProgress};
pub use stats::derive_user_stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    ExamCount,
    ScoreThreshold,
    Streak,
    Perfect,
    SubjectMaster,
    TimeSpent,
    Milestone,
    Speed,
}

impl RequirementType {
    pub const ALL: [RequirementType; 8] = [
        Self::ExamCount,
        Self::ScoreThreshold,
        Self::Streak,
        Self::Perfect,
        Self::SubjectMaster,
        Self::TimeSpent,
        Self::Milestone,
        Self::Speed,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exam_count" => Some(Self::ExamCount),
            "score_threshold" => Some(Self::ScoreThreshold),
            "streak" => Some(Self::Streak),
            "perfect" => Some(Self::Perfect),
            "subject_master" => Some(Self::SubjectMaster),
            "time_spent" => Some(Self::TimeSpent),
            "milestone" => Some(Self::Milestone),
            "speed" => Some(Self::Speed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExamCount => "exam_count",
            Self::ScoreThreshold => "score_threshold",
            Self::Streak => "streak",
            Self::Perfect => "perfect",
            Self::SubjectMaster => "subject_master",
            Self::TimeSpent => "time_spent",
            Self::Milestone => "milestone",
            Self::Speed => "speed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Progress,
    Performance,
    Consistency,
    Mastery,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub target: f64,
    /// Restricts `subject_master` to one subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub points: u32,
    pub requirement: Requirement,
}

impl AchievementDefinition {
    pub fn max_progress(&self) -> f64 {
        self.requirement.target
    }
}

/// Snapshot of a user's aggregate statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_exams: u32,
    pub average_score: f64,
    /// Consecutive study days ending today or yesterday
    pub current_streak: u32,
    pub perfect_scores: u32,
    /// Subject -> mastery on a 0-100 scale
    pub subject_mastery: BTreeMap<String, f64>,
    pub total_study_minutes: f64,
    pub total_points: u64,
}

/// Per-user state of one achievement, owned and persisted by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementState {
    pub id: String,
    pub progress: f64,
    pub max_progress: f64,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementState {
    pub fn locked(definition: &AchievementDefinition) -> Self {
        Self {
            id: definition.id.to_string(),
            progress: 0.0,
            max_progress: definition.max_progress(),
            unlocked: false,
            unlocked_at: None,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.max_progress <= 0.0 {
            return 100.0;
        }
        (self.progress / self.max_progress * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementEvaluation {
    /// One state per definition, in definition order
    pub states: Vec<AchievementState>,
    pub newly_unlocked: Vec<String>,
    /// Sum of the newly unlocked definitions' points
    pub points_awarded: u64,
}

/// Raw progress toward `requirement`, before clamping.
pub fn calculate_progress(requirement: &Requirement, stats: &UserStats) -> f64 {
    match requirement.kind {
        RequirementType::ExamCount => stats.total_exams as f64,
        RequirementType::ScoreThreshold => stats.average_score,
        RequirementType::Streak => stats.current_streak as f64,
        RequirementType::Perfect => stats.perfect_scores as f64,
        RequirementType::SubjectMaster => match requirement.subject {
            Some(subject) => stats.subject_mastery.get(subject).copied().unwrap_or(0.0),
            None => stats
                .subject_mastery
                .values()
                .copied()
                .fold(0.0, f64::max),
        },
        RequirementType::TimeSpent => stats.total_study_minutes,
        RequirementType::Milestone => stats.total_points as f64,
        // No timing data reaches this module yet.
        RequirementType::Speed => 0.0,
    }
}

/// Recomputes progress for every definition and reports fresh unlocks.
///
/// States in `prior` that are already unlocked are carried over unchanged, so
/// evaluating the same snapshot twice never unlocks anything the second time.
pub fn evaluate(
    definitions: &[AchievementDefinition],
    prior: &[AchievementState],
    stats: &UserStats,
    now: DateTime<Utc>,
) -> AchievementEvaluation {
    let prior_by_id: HashMap<&str, &AchievementState> =
        prior.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut states = Vec::with_capacity(definitions.len());
    let mut newly_unlocked = Vec::new();
    let mut points_awarded = 0u64;

    for definition in definitions {
        if let Some(existing) = prior_by_id.get(definition.id) {
            if existing.unlocked {
                states.push((*existing).clone());
                continue;
            }
        }

        let max_progress = definition.max_progress();
        let progress = calculate_progress(&definition.requirement, stats).clamp(0.0, max_progress);
        let unlocked = progress >= max_progress;

        if unlocked {
            tracing::info!(
                achievement = definition.id,
                points = definition.points,
                "achievement unlocked"
            );
            newly_unlocked.push(definition.id.to_string());
            points_awarded += u64::from(definition.points);
        }

        states.push(AchievementState {
            id: definition.id.to_string(),
            progress,
            max_progress,
            unlocked,
            unlocked_at: unlocked.then_some(now),
        });
    }

    AchievementEvaluation {
        states,
        newly_unlocked,
        points_awarded,
    }
}

/// [`evaluate`] over the built-in catalog.
pub fn evaluate_catalog(
    prior: &[AchievementState],
    stats: &UserStats,
    now: DateTime<Utc>,
) -> AchievementEvaluation {
    evaluate(ACHIEVEMENTS, prior, stats, now)
}
