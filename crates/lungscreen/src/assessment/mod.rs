//! Lung-cancer risk assessment: normalization, dual-path scoring, and history.
//!
//! Answers enter as a [`RawQuestionnaire`] and are normalized into two views:
//! the full-fidelity [`RiskFactors`] scored by the local point table, and the
//! binary-flattened [`FlattenedRiskFactors`] sent to the prediction service.
//! [`ScoringOrchestrator`] prefers the remote path and degrades to the local
//! scorer on any remote failure, so only malformed input is fatal.

pub mod domain;
pub mod import;
pub mod normalizer;
pub mod orchestrator;
pub mod predictor;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, FlattenedRiskFactors, RawQuestionnaire, RiskCategory, RiskFactors, RiskField,
    RiskResult, ScoringOutcome, ScoringSource,
};
pub use import::read_questionnaires;
pub use normalizer::{flatten, normalize, normalize_full, NormalizedInput, ValidationError};
pub use orchestrator::{ScoringOrchestrator, FALLBACK_WARNING};
pub use predictor::{HttpPredictor, PredictorError, RemotePrediction, RemotePredictor, RiskLevel};
pub use repository::{AssessmentRepository, AssessmentSummary, RepositoryError, SavedAssessment};
pub use router::assessment_router;
pub use scoring::{
    reconcile_factors, score_breakdown, score_locally, ScoreBreakdown, ScoreComponent,
    PREDICTION_FALLBACK_FACTOR, RAW_SCORE_DENOMINATOR,
};
pub use service::{AssessmentError, AssessmentReceipt, AssessmentRequest, AssessmentService};
