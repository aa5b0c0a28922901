use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_INSTANCES, DEFAULT_WINDOW_DAYS};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub expansion: ExpansionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Days covered by the instances window when no end date is requested.
    pub default_window_days: u32,
    /// Cap on occurrences generated by one expansion.
    pub max_instances: u16,
}

impl ExpansionConfig {
    /// ## Summary
    /// Returns the default window span as a `TimeDelta`.
    #[must_use]
    pub fn default_window(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::days(i64::from(self.default_window_days))
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            default_window_days: DEFAULT_WINDOW_DAYS,
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `config.toml` and `KAIROS_*` environment variables.
    /// Environment variables take precedence over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it,
    /// or checking its values fails.
    pub fn load() -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix("KAIROS")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.check()?;
        tracing::debug!(level = %settings.logging.level, "Configuration checked");
        Ok(settings)
    }

    /// ## Summary
    /// Returns a builder seeded with every default value.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be registered.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default(
                "expansion.default_window_days",
                i64::from(DEFAULT_WINDOW_DAYS),
            )?
            .set_default("expansion.max_instances", i64::from(DEFAULT_MAX_INSTANCES))?)
    }

    /// ## Summary
    /// Rejects values that deserialize but cannot drive an expansion.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` naming the offending key.
    pub fn check(&self) -> CoreResult<()> {
        if self.expansion.max_instances == 0 {
            return Err(CoreError::ConfigError(
                "expansion.max_instances must be at least 1".to_string(),
            ));
        }
        if self.expansion.default_window_days == 0 {
            return Err(CoreError::ConfigError(
                "expansion.default_window_days must be at least 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
