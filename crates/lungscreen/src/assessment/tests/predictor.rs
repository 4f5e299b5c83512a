use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::common::*;
use crate::assessment::domain::{RiskFactors, ScoringSource};
use crate::assessment::normalizer::flatten;
use crate::assessment::orchestrator::ScoringOrchestrator;
use crate::assessment::predictor::{HttpPredictor, PredictorError, RemotePredictor, RiskLevel};
use crate::config::PredictorConfig;

async fn predict_endpoint(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        )
            .into_response();
    }

    // Echo the smoking flag back so the test can see what was sent.
    let smoking = body["SMOKING"].as_u64().unwrap_or_default();
    let level = if smoking == 1 { "YES" } else { "NO" };
    Json(json!({
        "prediction_result": { "probability": 0.875, "risk_level": level },
        "patient_id": 12,
    }))
    .into_response()
}

async fn broken_endpoint() -> Response {
    Json(json!({ "probability": "high" })).into_response()
}

async fn spawn_prediction_service() -> SocketAddr {
    let app = Router::new()
        .route("/v1/predict", post(predict_endpoint))
        .route("/broken/predict", post(broken_endpoint));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server runs");
    });
    addr
}

fn predictor_for(base_url: String, token: Option<&str>) -> HttpPredictor {
    HttpPredictor::new(&PredictorConfig {
        base_url: Some(base_url),
        token: token.map(str::to_string),
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

#[tokio::test]
async fn posts_flattened_payload_with_bearer_token() {
    let addr = spawn_prediction_service().await;
    let predictor = predictor_for(format!("http://{addr}/v1"), Some("test-token"));
    let payload = flatten(&high_risk_factors());

    let prediction = predictor.predict(&payload).await.expect("prediction");

    assert_eq!(prediction.risk_level, RiskLevel::Yes);
    assert_eq!(prediction.risk_score(), 88);
}

#[tokio::test]
async fn error_body_detail_is_surfaced() {
    let addr = spawn_prediction_service().await;
    let predictor = predictor_for(format!("http://{addr}/v1"), None);

    let error = predictor
        .predict(&flatten(&RiskFactors::baseline()))
        .await
        .expect_err("unauthenticated request rejected");

    match error {
        PredictorError::Rejected { status, detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Not authenticated");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_malformed() {
    let addr = spawn_prediction_service().await;
    let predictor = predictor_for(format!("http://{addr}/broken"), None);

    let error = predictor
        .predict(&flatten(&RiskFactors::baseline()))
        .await
        .expect_err("body without a numeric probability");

    assert!(matches!(error, PredictorError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let predictor = predictor_for(format!("http://{addr}"), None);

    let error = predictor
        .predict(&flatten(&RiskFactors::baseline()))
        .await
        .expect_err("nothing is listening");

    assert!(matches!(error, PredictorError::Transport(_)));
}

#[tokio::test]
async fn unconfigured_predictor_fails_without_network() {
    let predictor = HttpPredictor::new(&PredictorConfig::default()).expect("client builds");

    let error = predictor
        .predict(&flatten(&RiskFactors::baseline()))
        .await
        .expect_err("no endpoint configured");

    assert!(matches!(error, PredictorError::NotConfigured));
}

#[tokio::test]
async fn orchestrator_falls_back_when_http_service_rejects() {
    let addr = spawn_prediction_service().await;
    let predictor = Arc::new(predictor_for(format!("http://{addr}/v1"), Some("wrong")));
    let orchestrator = ScoringOrchestrator::new(predictor);

    let outcome = orchestrator
        .score_with_fallback(&raw(&high_risk_factors()), true)
        .await
        .expect("fallback absorbs rejection");

    assert_eq!(outcome.source, ScoringSource::Local);
    assert!(outcome.used_fallback);
    assert_eq!(outcome.result.risk_score, 55);
}
