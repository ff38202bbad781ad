use crate::cli::ServeArgs;
use crate::infra::{load_portfolio, AppState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use homehub::config::AppConfig;
use homehub::error::AppError;
use homehub::telemetry;
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

    let portfolio = load_portfolio(&config.data, args.tenants_csv.take(), args.leases_csv.take())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        portfolio: Arc::new(portfolio),
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "homehub portfolio service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
