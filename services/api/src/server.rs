use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAllocationRepository, InMemoryPostingRepository};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use yuvasetu::config::AppConfig;
use yuvasetu::error::AppError;
use yuvasetu::telemetry;
use yuvasetu::workflows::import::PostingCsvImporter;
use yuvasetu::workflows::matching::{MatchEngine, MatchService};

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

    let match_service = Arc::new(MatchService::new(
        Arc::new(InMemoryPostingRepository::default()),
        Arc::new(InMemoryAllocationRepository::default()),
        MatchEngine::default(),
        config.matching,
    ));

    if let Some(path) = args.seed_csv.take() {
        for posting in PostingCsvImporter::from_path(&path)? {
            match_service.import_posting(posting)?;
        }
    }

    let app = with_matching_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "internship matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
