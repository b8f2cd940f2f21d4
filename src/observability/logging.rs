//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Create a tracing span for a single permission decision.
///
/// ```rust,ignore
/// let span = decision_span!(Action::Manage, ResourceKind::Team, user.id);
/// ```
#[macro_export]
macro_rules! decision_span {
    ($action:expr, $kind:expr, $subject:expr) => {
        tracing::debug_span!(
            "permission_check",
            action = %$action,
            kind = %$kind,
            user_id = %$subject,
            team_id = tracing::field::Empty
        )
    };
    ($action:expr, $kind:expr, $subject:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "permission_check",
            action = %$action,
            kind = %$kind,
            user_id = %$subject,
            team_id = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Build the env filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| Error::config(format!("Invalid log level '{}': {}", config.log_level, e))),
    }
}

/// Install the global subscriber. Returns `Ok(false)` if one was already set.
pub fn init_logging(config: &ObservabilityConfig) -> Result<bool> {
    let filter = env_filter(config)?;

    let installed = if config.json_logging {
        fmt().json().with_env_filter(filter).with_current_span(true).try_init().is_ok()
    } else {
        fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
    };

    if installed {
        tracing::info!(
            service_name = %config.service_name,
            log_level = %config.log_level,
            json_logging = config.json_logging,
            "Logging initialized"
        );
    }
    Ok(installed)
}

/// Log the loaded settings at startup
pub fn log_settings_info(settings: &crate::config::Settings) {
    tracing::info!(
        service_name = %settings.observability.service_name,
        billing_enabled = settings.features.billing,
        stripe_integration_enabled = settings.features.stripe_integration,
        "Authorization settings loaded"
    );
}
