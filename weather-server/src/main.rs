use tracing::{info, warn};

use weather_server::config::ServerConfig;
use weather_server::logging::init_logging;
use weather_server::query::WeatherService;
use weather_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = ServerConfig::from_env();

    // Build the weather service
    let weather = WeatherService::new(config.stats.clone());
    if config.seed_demo_airports {
        weather.seed_demo_airports();
        info!(airports = weather.list_airports().len(), "Seeded demo airports");
    }

    // Build app state and router
    let state = AppState::new(weather);
    let app = create_router(state);

    // Bind and serve
    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Airport weather server listening on http://{addr}");
    info!("Collector endpoints under /collect, query endpoints under /query");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
