use crate::cli::ServeArgs;
use crate::infra::{build_service, AppState};
use crate::routes::with_consent_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use consent_desk::config::AppConfig;
use consent_desk::error::AppError;
use consent_desk::telemetry;
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

    if config.admin.identifier.is_none() || config.admin.secret.is_none() {
        warn!("APP_ADMIN_IDENTIFIER/APP_ADMIN_SECRET not set; admin endpoints will reject every login");
    }

    let consent_service = build_service(&config);
    let app = with_consent_routes(consent_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        seeded = config.store.seed_sample_data,
        latency_ms = config.store.latency.as_millis() as u64,
        "consent desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
