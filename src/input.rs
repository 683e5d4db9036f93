use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{CandidateExam, StudentPerformance};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One request for the engine, as supplied by an upstream caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub student: StudentPerformance,
    #[serde(default)]
    pub exams: Vec<CandidateExam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl RecommendationInput {
    pub fn from_json(raw: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let raw = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}
