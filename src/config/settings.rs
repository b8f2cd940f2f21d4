//! # Configuration Settings
//!
//! Layered configuration: built-in defaults, an optional file named by
//! `TEAMGUARD_CONFIG_FILE`, then `TEAMGUARD__*` environment variables
//! (for example `TEAMGUARD__FEATURES__BILLING=true`).

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "TEAMGUARD";

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_ENV: &str = "TEAMGUARD_CONFIG_FILE";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct Settings {
    /// Deployment feature flags
    #[validate(nested)]
    pub features: FeaturesConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Load settings from `.env`, the optional config file, and the environment.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref())
    }

    /// Load settings from an explicit file (if any) plus environment overrides.
    pub fn load_from(file: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    fn validate_custom(&self) -> Result<()> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::validation_field(
                format!(
                    "Log level must be one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
                "log_level",
            ));
        }
        Ok(())
    }
}

/// Feature flags for gated permissions. Everything defaults to off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Team subscriptions and plan management
    pub billing: bool,

    /// Stripe Connect accounts and team installations
    pub stripe_integration: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Service name attached to log output
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "teamguard".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}
