//! # Observability Infrastructure
//!
//! Structured logging for the authorization layer. Permission decisions are
//! emitted at `debug`, lookup failures and unknown role ids at `warn`.

pub mod logging;

pub use logging::{env_filter, init_logging, log_settings_info};
