use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AssessmentId, RawQuestionnaire, ScoringOutcome};
use super::normalizer::{normalize, ValidationError};
use super::orchestrator::ScoringOrchestrator;
use super::predictor::RemotePredictor;
use super::repository::{AssessmentRepository, AssessmentSummary, RepositoryError, SavedAssessment};

/// Caller input for one assessment. Identity is passed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub answers: RawQuestionnaire,
    #[serde(default)]
    pub recorded_by: Option<String>,
    #[serde(default = "default_use_remote")]
    pub use_remote: bool,
}

fn default_use_remote() -> bool {
    true
}

/// Stored assessment plus the non-fatal warning raised while scoring it.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReceipt {
    #[serde(flatten)]
    pub assessment: SavedAssessment,
    pub recommendations: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Service composing the scoring orchestrator and the history repository.
pub struct AssessmentService<P, R> {
    orchestrator: ScoringOrchestrator<P>,
    repository: Arc<R>,
    remote_enabled: bool,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("assessment-{id:06}"))
}

impl<P, R> AssessmentService<P, R>
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    pub fn new(predictor: Arc<P>, repository: Arc<R>) -> Self {
        Self {
            orchestrator: ScoringOrchestrator::new(predictor),
            repository,
            remote_enabled: true,
        }
    }

    /// Deployment-wide switch; when off, requests asking for remote
    /// scoring are served by the local scorer without a fallback warning.
    pub fn with_remote_scoring(mut self, enabled: bool) -> Self {
        self.remote_enabled = enabled;
        self
    }

    /// Score without storing anything.
    pub async fn score(
        &self,
        answers: &RawQuestionnaire,
        use_remote: bool,
    ) -> Result<ScoringOutcome, AssessmentError> {
        Ok(self
            .orchestrator
            .score_with_fallback(answers, use_remote && self.remote_enabled)
            .await?)
    }

    /// Score a questionnaire and append it to the history.
    pub async fn assess(
        &self,
        request: AssessmentRequest,
    ) -> Result<AssessmentReceipt, AssessmentError> {
        let input = normalize(&request.answers)?;
        let outcome = self
            .orchestrator
            .score_normalized(&input, request.use_remote && self.remote_enabled)
            .await;
        let category = outcome.category();

        let assessment = SavedAssessment {
            id: next_assessment_id(),
            recorded_by: request.recorded_by,
            created_at: Utc::now(),
            factors: input.full,
            result: outcome.result,
            category,
            source: outcome.source,
            used_fallback: outcome.used_fallback,
        };

        let stored = self.repository.insert(assessment)?;
        info!(
            id = %stored.id,
            score = stored.result.risk_score,
            category = category.label(),
            "assessment recorded"
        );

        Ok(AssessmentReceipt {
            assessment: stored,
            recommendations: category.recommendations(),
            warning: outcome.warning,
        })
    }

    pub fn get(&self, id: &AssessmentId) -> Result<SavedAssessment, AssessmentError> {
        match self.repository.fetch(id)? {
            Some(assessment) => Ok(assessment),
            None => Err(RepositoryError::NotFound.into()),
        }
    }

    pub fn history(&self) -> Result<Vec<SavedAssessment>, AssessmentError> {
        Ok(self.repository.list()?)
    }

    pub fn delete(&self, id: &AssessmentId) -> Result<(), AssessmentError> {
        if self.repository.delete(id)? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound.into())
        }
    }

    pub fn summary(&self, recorded_by: &str) -> Result<AssessmentSummary, AssessmentError> {
        let history = self.repository.list_by_recorder(recorded_by)?;
        if history.is_empty() {
            return Err(AssessmentError::NoHistory {
                recorded_by: recorded_by.to_string(),
            });
        }
        Ok(AssessmentSummary::from_history(&history))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no assessments recorded by {recorded_by}")]
    NoHistory { recorded_by: String },
}
