//! # Larder Server
//!
//! Serves the user access layer over HTTP, backed by the configured store
//! and cache.

use larder_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use larder_core::{LarderError, LarderResult};
use axum::Router;
use larder_rest::create_router_with;
use larder_server::startup::{print_banner, print_startup_info};
use larder_server::telemetry::{init_logging, install_metrics};
use larder_server::AppComponents;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let environment = loader.environment().to_string();
    let config = loader.into_config();

    init_logging(&config.observability);
    print_banner();
    info!("Starting Larder Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> LarderResult<()> {
    let components = AppComponents::build(&config).await?;

    let metrics = install_metrics(&config.observability)?.unwrap_or_else(Router::new);
    let router = create_router_with(components.app_state(), &config.server, metrics);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LarderError::internal(format!("Failed to bind {}: {}", addr, e)))?;
    print_startup_info(&config);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LarderError::internal(format!("Server error: {}", e)));

    components.shutdown().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
