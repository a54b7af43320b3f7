use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_score::config::AppConfig;
use lead_score::error::AppError;
use lead_score::telemetry;
use lead_score::workflows::import::LeadCsvImporter;
use lead_score::workflows::leads::LeadScoringService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.dataset = Some(dataset);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scoring_service = Arc::new(LeadScoringService::new(config.scoring.clone()));
    if let Some(dataset) = &config.dataset {
        let records = LeadCsvImporter::from_path(dataset, &config.scoring.outcome_column)?;
        scoring_service.calibrate(&records)?;
        info!(dataset = %dataset.display(), "startup calibration complete");
    }

    let app = with_lead_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead score service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
