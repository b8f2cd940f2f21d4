//! # Configuration Management
//!
//! Settings for the authorization layer: which gated features this deployment
//! enables, and how logging is set up.

pub mod settings;

pub use settings::{FeaturesConfig, ObservabilityConfig, Settings};
