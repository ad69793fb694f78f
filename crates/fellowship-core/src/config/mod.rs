use std::path::Path;

use config::{Config, FileFormat, Source};
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_LOG_LEVEL, DEFAULT_MAX_OCCURRENCES, DEFAULT_PROJECTION_MONTHS,
    DEFAULT_TIMEZONE, ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// IANA timezone that program dates and times are anchored to.
    pub timezone: String,
    pub projection_months: u32,
    pub max_occurrences: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` in the
    /// working directory and `FELLOWSHIP_*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating it fails.
    pub fn load() -> CoreResult<Self> {
        Self::load_with(config::File::with_name(CONFIG_FILE_NAME).required(false))
    }

    /// ## Summary
    /// Loads configuration like [`Settings::load`] but from an explicit file
    /// that must exist.
    ///
    /// ## Errors
    /// Returns an error if the file is missing or the resulting settings are invalid.
    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        Self::load_with(config::File::from(path).required(true))
    }

    /// ## Summary
    /// Builds settings from an inline TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document does not parse or fails validation.
    pub fn from_toml_str(toml: &str) -> CoreResult<Self> {
        let settings = defaults()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        Ok(settings)
    }

    fn load_with<S>(file: S) -> CoreResult<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = defaults()?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        settings.validate()?;
        tracing::debug!(settings = ?settings, "Settings loaded");
        Ok(settings)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.schedule.timezone.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "schedule.timezone must not be empty".to_string(),
            ));
        }
        if self.schedule.projection_months == 0 {
            return Err(CoreError::InvalidConfiguration(
                "schedule.projection_months must be at least 1".to_string(),
            ));
        }
        if self.schedule.max_occurrences == 0 {
            return Err(CoreError::InvalidConfiguration(
                "schedule.max_occurrences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn defaults() -> CoreResult<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(Config::builder()
        .set_default("schedule.timezone", DEFAULT_TIMEZONE)?
        .set_default(
            "schedule.projection_months",
            i64::from(DEFAULT_PROJECTION_MONTHS),
        )?
        .set_default("schedule.max_occurrences", i64::from(DEFAULT_MAX_OCCURRENCES))?
        .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> CoreResult<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
