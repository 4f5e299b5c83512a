use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentRepository};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lungscreen::assessment::{AssessmentService, HttpPredictor};
use lungscreen::config::AppConfig;
use lungscreen::error::AppError;
use lungscreen::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let predictor = HttpPredictor::new(&config.predictor)?;
    match predictor.endpoint() {
        Some(endpoint) => info!(%endpoint, "prediction service configured"),
        None => warn!("PREDICTOR_URL not set, remote scoring will fall back to the local scorer"),
    }

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let assessment_service = Arc::new(
        AssessmentService::new(Arc::new(predictor), repository)
            .with_remote_scoring(config.scoring.use_remote),
    );

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        remote_scoring = config.scoring.use_remote,
        "risk assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
