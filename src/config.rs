use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_RECOMMENDATION_LIMIT;

pub const SUBJECT_PREFERENCE_WEIGHT: f64 = 0.25;
pub const PERFORMANCE_HISTORY_WEIGHT: f64 = 0.30;
pub const DIFFICULTY_PROGRESSION_WEIGHT: f64 = 0.20;
pub const WEAK_AREA_IMPROVEMENT_WEIGHT: f64 = 0.15;
pub const RECENCY_WEIGHT: f64 = 0.10;

/// Candidates at or below this confidence are dropped
pub const MIN_CONFIDENCE: f64 = 0.3;
pub const HIGH_PRIORITY_CONFIDENCE: f64 = 0.8;
pub const MEDIUM_PRIORITY_CONFIDENCE: f64 = 0.6;

pub const PREFERRED_SUBJECT_REASON_THRESHOLD: f64 = 0.7;
pub const STRONG_HISTORY_REASON_THRESHOLD: f64 = 0.7;
pub const WEAK_AREA_REASON_THRESHOLD: f64 = 0.6;
pub const DIFFICULTY_REASON_THRESHOLD: f64 = 0.7;
/// Raw 0-100 subject average, not a sub-score
pub const SUBJECT_AVERAGE_REASON_THRESHOLD: f64 = 75.0;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;
const DEFAULT_MOCK_SEED: u64 = 42;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
    #[error("weight {name} must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("weights must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub subject_preference: f64,
    pub performance_history: f64,
    pub difficulty_progression: f64,
    pub weak_area_improvement: f64,
    pub recency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            subject_preference: SUBJECT_PREFERENCE_WEIGHT,
            performance_history: PERFORMANCE_HISTORY_WEIGHT,
            difficulty_progression: DIFFICULTY_PROGRESSION_WEIGHT,
            weak_area_improvement: WEAK_AREA_IMPROVEMENT_WEIGHT,
            recency: RECENCY_WEIGHT,
        }
    }
}

impl ScoreWeights {
    fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("subjectPreference", self.subject_preference),
            ("performanceHistory", self.performance_history),
            ("difficultyProgression", self.difficulty_progression),
            ("weakAreaImprovement", self.weak_area_improvement),
            ("recency", self.recency),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.named().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonThresholds {
    pub preferred_subject: f64,
    pub strong_history: f64,
    pub weak_area: f64,
    pub difficulty: f64,
    pub subject_average: f64,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            preferred_subject: PREFERRED_SUBJECT_REASON_THRESHOLD,
            strong_history: STRONG_HISTORY_REASON_THRESHOLD,
            weak_area: WEAK_AREA_REASON_THRESHOLD,
            difficulty: DIFFICULTY_REASON_THRESHOLD,
            subject_average: SUBJECT_AVERAGE_REASON_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationConfig {
    pub weights: ScoreWeights,
    pub min_confidence: f64,
    pub high_priority_confidence: f64,
    pub medium_priority_confidence: f64,
    pub reasons: ReasonThresholds,
    pub default_limit: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            min_confidence: MIN_CONFIDENCE,
            high_priority_confidence: HIGH_PRIORITY_CONFIDENCE,
            medium_priority_confidence: MEDIUM_PRIORITY_CONFIDENCE,
            reasons: ReasonThresholds::default(),
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

impl RecommendationConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if !(0.0..1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Validation(format!(
                "minConfidence must be in [0, 1), got {}",
                self.min_confidence
            )));
        }
        if self.medium_priority_confidence > self.high_priority_confidence {
            return Err(ConfigError::Validation(
                "mediumPriorityConfidence must not exceed highPriorityConfidence".to_string(),
            ));
        }
        Ok(())
    }
}

/// Process-level settings for the demo binary
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub recommendation: RecommendationConfig,
    pub mock_seed: u64,
    pub input_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source, e.g. a map in tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut recommendation = RecommendationConfig::default();
        let weights = &mut recommendation.weights;
        override_from(&get, "REC_WEIGHT_SUBJECT_PREFERENCE", &mut weights.subject_preference)?;
        override_from(&get, "REC_WEIGHT_PERFORMANCE_HISTORY", &mut weights.performance_history)?;
        override_from(&get, "REC_WEIGHT_DIFFICULTY_PROGRESSION", &mut weights.difficulty_progression)?;
        override_from(&get, "REC_WEIGHT_WEAK_AREA_IMPROVEMENT", &mut weights.weak_area_improvement)?;
        override_from(&get, "REC_WEIGHT_RECENCY", &mut weights.recency)?;
        override_from(&get, "REC_MIN_CONFIDENCE", &mut recommendation.min_confidence)?;
        override_from(&get, "REC_DEFAULT_LIMIT", &mut recommendation.default_limit)?;
        recommendation.validate()?;

        let mut mock_seed = DEFAULT_MOCK_SEED;
        override_from(&get, "REC_MOCK_SEED", &mut mock_seed)?;

        Ok(Self {
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            recommendation,
            mock_seed,
            input_path: get("REC_INPUT_PATH").map(PathBuf::from),
        })
    }
}

fn override_from<T, G>(get: &G, key: &str, target: &mut T) -> Result<(), ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    if let Some(raw) = get(key) {
        *target = raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}
