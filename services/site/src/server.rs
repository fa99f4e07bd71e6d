use crate::cli::ServeArgs;
use crate::infra::{resolve_location, AppState, SiteContext};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use math_reviews::config::AppConfig;
use math_reviews::error::AppError;
use math_reviews::reviews::{HttpReviewSource, PageOptions};
use math_reviews::telemetry;
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
    config.site.data = resolve_location(args.data.as_deref(), &config.site.data);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let site = Arc::new(SiteContext::new(
        HttpReviewSource::default(),
        config.site.data.clone(),
        PageOptions::new(config.site.title.clone()),
    ));

    let app = with_site_routes(site)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, data = %config.site.data, "review site ready");

    axum::serve(listener, app).await?;
    Ok(())
}
