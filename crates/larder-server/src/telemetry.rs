//! Logging and metrics setup.

use axum::{routing::get, Router};
use larder_config::ObservabilityConfig;
use larder_core::{LarderError, LarderResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub fn default_filter(level: &str) -> String {
    let level = level.to_lowercase();
    if level == "info" {
        "info,larder=debug,tower_http=debug".to_string()
    } else {
        level
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Installs the Prometheus recorder and returns a router serving its output.
///
/// Returns `None` when metrics are disabled.
pub fn install_metrics(config: &ObservabilityConfig) -> LarderResult<Option<Router>> {
    if !config.metrics_enabled {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| LarderError::internal(format!("Failed to install metrics recorder: {}", e)))?;
    larder_service::cache::metrics::register_metrics();

    Ok(Some(metrics_router(&config.metrics_path, handle)))
}

/// Router exposing the recorder's text exposition at `path`.
pub fn metrics_router(path: &str, handle: PrometheusHandle) -> Router {
    Router::new().route(
        path,
        get(move || std::future::ready(handle.render())),
    )
}
