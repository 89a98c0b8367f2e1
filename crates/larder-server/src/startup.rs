//! Server startup utilities.

use larder_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    __                    __
   / /   ____ __________/ /__  _____
  / /   / __ `/ ___/ __  / _ \/ ___/
 / /___/ /_/ / /  / /_/ /  __/ /
/_____/\__,_/_/   \__,_/\___/_/
    "#);
}

/// Builds the endpoint summary logged once the server is bound.
#[must_use]
pub fn startup_lines(config: &AppConfig) -> Vec<String> {
    let base = format!("http://{}", config.server.addr());
    let mut lines = vec![
        format!("Users:     {}/", base),
        format!("Health:    {}/health", base),
        format!("Ready:     {}/ready", base),
        format!("API Docs:  {}/swagger-ui", base),
    ];
    if config.observability.metrics_enabled {
        lines.push(format!(
            "Metrics:   {}{}",
            base, config.observability.metrics_path
        ));
    }
    lines
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!(
        "Store: {} | Cache: {}",
        config.store.backend, config.cache.backend
    );
    for line in startup_lines(config) {
        info!("{}", line);
    }
    info!("{}", separator);
}
