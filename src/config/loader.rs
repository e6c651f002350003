//! Configuration Loader
//!
//! Environment-aware configuration loading: file discovery, environment
//! detection, and environment-variable overrides.

use super::{AppConfig, ConfigurationError};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads and holds the application configuration together with the
/// environment it was resolved for.
pub struct ConfigManager {
    config: AppConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection.
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::load_from_directory(Path::new("config"))
    }

    /// Load configuration from a specific directory.
    pub fn load_from_directory(config_dir: &Path) -> Result<Self, ConfigurationError> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration with an explicit environment. Useful in tests,
    /// which must not mutate process-wide environment variables.
    pub fn load_from_directory_with_env(
        config_dir: &Path,
        environment: &str,
    ) -> Result<Self, ConfigurationError> {
        debug!(
            environment,
            directory = %config_dir.display(),
            "loading configuration"
        );

        let default_file: PathBuf = config_dir.join("default");
        let env_file: PathBuf = config_dir.join(environment);

        let config: AppConfig = Config::builder()
            .add_source(File::from(default_file).required(false))
            .add_source(File::from(env_file).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            host = %config.http.host,
            port = config.http.port,
            pool_size = config.database.pool,
            "configuration loaded"
        );

        Ok(Self {
            config,
            environment: environment.to_string(),
        })
    }

    /// Detect the current environment from `APP_ENV`, defaulting to
    /// `development`.
    pub fn detect_environment() -> String {
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
