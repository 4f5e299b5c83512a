use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{RawQuestionnaire, RiskResult, ScoringOutcome, ScoringSource};
use super::normalizer::{normalize, NormalizedInput, ValidationError};
use super::predictor::RemotePredictor;
use super::scoring::{reconcile_factors, score_locally};

/// Warning attached to outcomes that had to fall back to the local scorer.
pub const FALLBACK_WARNING: &str = "remote scoring unavailable, used local estimate";

/// Chooses between the remote and local scoring paths for one request.
pub struct ScoringOrchestrator<P> {
    predictor: Arc<P>,
}

impl<P> ScoringOrchestrator<P>
where
    P: RemotePredictor,
{
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    /// Normalize then score. Only malformed input is fatal; any remote
    /// failure degrades to the local scorer.
    pub async fn score_with_fallback(
        &self,
        raw: &RawQuestionnaire,
        use_remote: bool,
    ) -> Result<ScoringOutcome, ValidationError> {
        let input = normalize(raw)?;
        Ok(self.score_normalized(&input, use_remote).await)
    }

    pub async fn score_normalized(
        &self,
        input: &NormalizedInput,
        use_remote: bool,
    ) -> ScoringOutcome {
        if !use_remote {
            let result = score_locally(&input.full);
            info!(score = result.risk_score, "scored locally");
            return ScoringOutcome {
                result,
                source: ScoringSource::Local,
                used_fallback: false,
                warning: None,
            };
        }

        match self.predictor.predict(&input.flattened).await {
            Ok(prediction) => {
                let result = RiskResult {
                    risk_score: prediction.risk_score(),
                    risk_factors: reconcile_factors(&input.flattened, prediction.is_at_risk()),
                };
                info!(
                    score = result.risk_score,
                    at_risk = prediction.is_at_risk(),
                    "scored by remote predictor"
                );
                ScoringOutcome {
                    result,
                    source: ScoringSource::Remote,
                    used_fallback: false,
                    warning: None,
                }
            }
            Err(error) => {
                warn!(%error, "remote prediction failed, falling back to local scorer");
                ScoringOutcome {
                    result: score_locally(&input.full),
                    source: ScoringSource::Local,
                    used_fallback: true,
                    warning: Some(FALLBACK_WARNING.to_string()),
                }
            }
        }
    }
}
