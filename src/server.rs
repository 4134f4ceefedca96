use anyhow::Result;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState, DELIVERY_ORDER_PRICE_PATH},
    metrics,
    pricing::DeliveryPriceService,
    signals::setup_signal_handlers,
    venue::HttpVenueProvider,
};

/// Start the DOPC server
///
/// Builds the venue client and pricing service, binds the configured
/// address and serves until SIGTERM/SIGINT.
pub async fn start_server(config: Config) -> Result<()> {
    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        Some(Arc::new(metrics::init_metrics()?))
    } else {
        None
    };

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = build_app_state(&config)?;
    let app = create_router(
        app_state,
        metrics_handle.map(|handle| (config.metrics.endpoint.clone(), handle)),
    );

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting DOPC on {}", addr);
    info!(
        venue_api = %config.venue_api.base_url,
        timeout_seconds = config.venue_api.timeout_seconds,
        strict_status_codes = config.server.strict_status_codes,
        "Configuration loaded"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Wire the HTTP venue provider into a pricing service
pub fn build_app_state(config: &Config) -> Result<AppState> {
    let provider = HttpVenueProvider::new(reqwest::Client::new(), &config.venue_api)?;

    Ok(AppState {
        service: DeliveryPriceService::new(Arc::new(provider)),
        strict_status_codes: config.server.strict_status_codes,
    })
}

/// Create the Axum router with all routes and middleware
///
/// `metrics` is the exposition path and recorder handle; `None` disables it.
pub fn create_router(
    app_state: AppState,
    metrics: Option<(String, Arc<PrometheusHandle>)>,
) -> Router {
    let api_routes = Router::new()
        .route(
            DELIVERY_ORDER_PRICE_PATH,
            get(handlers::delivery_order_price::handle_delivery_order_price),
        )
        .with_state(app_state);

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(api_routes);

    if let Some((endpoint, handle)) = metrics {
        router = router.merge(
            Router::new()
                .route(&endpoint, get(handlers::metrics_handler::metrics))
                .with_state(handle),
        );
    }

    router.layer(TraceLayer::new_for_http())
}
