use crate::cli::ServeArgs;
use crate::infra::{spawn_draft_purge, AppState, InMemorySurveyRepository};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use farm_sustainability::config::AppConfig;
use farm_sustainability::error::AppError;
use farm_sustainability::survey::{DraftStore, SustainabilityService};
use farm_sustainability::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySurveyRepository::default());
    let service = Arc::new(SustainabilityService::new(repository));
    let drafts = Arc::new(DraftStore::new());
    spawn_draft_purge(drafts.clone(), config.drafts.ttl());

    let app = with_survey_routes(service, drafts)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        draft_ttl_hours = config.drafts.ttl_hours,
        "sustainability scoring service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
