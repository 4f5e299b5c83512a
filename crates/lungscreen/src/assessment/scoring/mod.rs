//! Local deterministic scorer and the remote-path factor reconciler.
//!
//! The two share factor wording but not thresholds: the scorer reads the
//! full-fidelity view, the reconciler reads the binary-flattened one.

mod reconciler;
mod rules;

pub use reconciler::{reconcile_factors, PREDICTION_FALLBACK_FACTOR};

use serde::Serialize;
use tracing::debug;

use super::domain::{RiskFactors, RiskField, RiskResult};

/// Fixed normalization constant for raw points. Not the sum of the table's
/// maxima, which is why the normalized score is clamped at 100.
pub const RAW_SCORE_DENOMINATOR: f64 = 150.0;

/// One field's contribution to the raw score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub field: RiskField,
    pub points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<&'static str>,
}

/// Every component in evaluation order plus the raw total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub raw_score: f64,
}

impl ScoreBreakdown {
    pub fn normalized_score(&self) -> u8 {
        let scaled = (self.raw_score / RAW_SCORE_DENOMINATOR * 100.0).round();
        scaled.clamp(0.0, 100.0) as u8
    }

    pub fn factors(&self) -> Vec<String> {
        self.components
            .iter()
            .filter_map(|component| component.factor)
            .map(str::to_string)
            .collect()
    }

    pub fn into_result(self) -> RiskResult {
        RiskResult {
            risk_score: self.normalized_score(),
            risk_factors: self.factors(),
        }
    }
}

pub fn score_breakdown(factors: &RiskFactors) -> ScoreBreakdown {
    let components = rules::score_components(factors);
    let raw_score = components.iter().map(|component| component.points).sum();
    debug!(raw_score, "local point table evaluated");
    ScoreBreakdown {
        components,
        raw_score,
    }
}

/// Pure point-table scoring over the full-fidelity view.
pub fn score_locally(factors: &RiskFactors) -> RiskResult {
    score_breakdown(factors).into_result()
}
