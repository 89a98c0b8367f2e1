//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use larder_core::{LarderError, LarderResult};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable selecting the environment overlay file.
pub const ENVIRONMENT_VAR: &str = "LARDER_ENVIRONMENT";

/// Prefix for environment variable overrides, e.g. `LARDER__CACHE__TTL_SECS`.
pub const ENV_PREFIX: &str = "LARDER";

/// Resolves the environment and loads its configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `LARDER__` prefix
    pub fn new(config_dir: impl Into<String>) -> LarderResult<Self> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> LarderResult<Self> {
        let environment = environment.into();
        let config = load_config(&config_dir.into(), &environment)?;

        Ok(Self {
            config,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> LarderResult<Self> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Returns the environment this loader was created for.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }
}

/// Loads and validates configuration from `config_dir` for `environment`.
pub fn load_config(config_dir: &str, environment: &str) -> LarderResult<AppConfig> {
    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder();

    for name in ["default", environment, "local"] {
        let path = format!("{}/{}.toml", config_dir, name);
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let mut app_config: AppConfig = builder
        .build()
        .and_then(|config| config.try_deserialize())
        .map_err(config_error_to_larder_error)?;
    app_config.app.environment = environment.to_string();

    ConfigValidator::validate(&app_config).map_err(|errors| {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        LarderError::Configuration(joined)
    })?;

    Ok(app_config)
}

fn config_error_to_larder_error(err: ConfigError) -> LarderError {
    LarderError::Configuration(err.to_string())
}
