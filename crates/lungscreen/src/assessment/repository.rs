use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, RiskCategory, RiskFactors, RiskResult, ScoringSource};

/// Stored assessment: the answers as scored plus the result they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAssessment {
    pub id: AssessmentId,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub factors: RiskFactors,
    #[serde(flatten)]
    pub result: RiskResult,
    pub category: RiskCategory,
    pub source: ScoringSource,
    pub used_fallback: bool,
}

/// Dashboard rollup for one recorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub total_assessments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_assessment_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_score: Option<u8>,
}

impl AssessmentSummary {
    /// `history` must be newest first.
    pub fn from_history(history: &[SavedAssessment]) -> Self {
        let latest = history.first();
        Self {
            total_assessments: history.len(),
            last_assessment_at: latest.map(|assessment| assessment.created_at),
            latest_score: latest.map(|assessment| assessment.result.risk_score),
        }
    }
}

/// Append-only history store so the service can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: SavedAssessment) -> Result<SavedAssessment, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<SavedAssessment>, RepositoryError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<SavedAssessment>, RepositoryError>;
    /// Newest first.
    fn list_by_recorder(&self, recorded_by: &str) -> Result<Vec<SavedAssessment>, RepositoryError>;
    fn delete(&self, id: &AssessmentId) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assessment already exists")]
    Conflict,
    #[error("assessment not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
