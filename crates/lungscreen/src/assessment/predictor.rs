use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::FlattenedRiskFactors;
use crate::config::PredictorConfig;

/// Categorical verdict returned alongside the probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "YES")]
    Yes,
    #[serde(rename = "NO")]
    No,
}

/// Validated output of the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemotePrediction {
    pub probability: f64,
    pub risk_level: RiskLevel,
}

impl RemotePrediction {
    pub fn new(probability: f64, risk_level: RiskLevel) -> Result<Self, PredictorError> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PredictorError::Malformed(format!(
                "probability {probability} outside 0..=1"
            )));
        }
        Ok(Self {
            probability,
            risk_level,
        })
    }

    pub fn is_at_risk(&self) -> bool {
        self.risk_level == RiskLevel::Yes
    }

    pub fn risk_score(&self) -> u8 {
        (self.probability * 100.0).round() as u8
    }
}

/// Failure modes of a single prediction attempt.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("remote predictor is not configured")]
    NotConfigured,
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("malformed prediction response: {0}")]
    Malformed(String),
}

/// Boundary to the prediction service. One call is one attempt; retries
/// belong to the caller.
pub trait RemotePredictor: Send + Sync {
    fn predict(
        &self,
        payload: &FlattenedRiskFactors,
    ) -> impl Future<Output = Result<RemotePrediction, PredictorError>> + Send;
}

/// reqwest-backed predictor posting to `{base_url}/predict`.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: Option<String>,
    token: Option<String>,
}

impl HttpPredictor {
    pub fn new(config: &PredictorConfig) -> Result<Self, PredictorError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let endpoint = config
            .base_url
            .as_deref()
            .map(|base| format!("{}/predict", base.trim_end_matches('/')));

        Ok(Self {
            client,
            endpoint,
            token: config.token.clone(),
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl RemotePredictor for HttpPredictor {
    async fn predict(
        &self,
        payload: &FlattenedRiskFactors,
    ) -> Result<RemotePrediction, PredictorError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            return Err(PredictorError::NotConfigured);
        };

        let mut request = self.client.post(endpoint).json(payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            let body = response.text().await.unwrap_or_default();
            return Err(PredictorError::Rejected {
                status: status.as_u16(),
                detail: error_detail(&body).unwrap_or_else(|| reason.to_string()),
            });
        }

        let envelope: PredictionEnvelope = response
            .json()
            .await
            .map_err(|err| PredictorError::Malformed(err.to_string()))?;
        let prediction = envelope.into_prediction()?;
        debug!(
            probability = prediction.probability,
            risk_level = ?prediction.risk_level,
            "remote prediction received"
        );
        Ok(prediction)
    }
}

/// The service answers either bare or wrapped with the stored patient id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionEnvelope {
    Wrapped { prediction_result: WirePrediction },
    Bare(WirePrediction),
}

#[derive(Debug, Deserialize)]
struct WirePrediction {
    probability: f64,
    risk_level: String,
}

impl PredictionEnvelope {
    fn into_prediction(self) -> Result<RemotePrediction, PredictorError> {
        let wire = match self {
            PredictionEnvelope::Wrapped { prediction_result } => prediction_result,
            PredictionEnvelope::Bare(wire) => wire,
        };
        let risk_level = match wire.risk_level.trim() {
            "YES" => RiskLevel::Yes,
            "NO" => RiskLevel::No,
            other => {
                let detail = format!("unknown risk_level '{other}'");
                return Err(PredictorError::Malformed(detail));
            }
        };
        RemotePrediction::new(wire.probability, risk_level)
    }
}

fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}
