//! Deployment feature flags consulted by gated permission rules.
//!
//! A missing flag source means every feature is disabled, so rules gated on a
//! feature deny until the deployment turns it on explicitly.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::config::FeaturesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Team subscriptions and plan management
    Billing,
    /// Stripe Connect OAuth accounts and team installations
    StripeIntegration,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Billing => "billing",
            Feature::StripeIntegration => "stripe_integration",
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answers whether a feature is enabled for this deployment.
pub trait FeatureFlags: Send + Sync {
    fn is_enabled(&self, feature: Feature) -> bool;
}

impl FeatureFlags for FeaturesConfig {
    fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Billing => self.billing,
            Feature::StripeIntegration => self.stripe_integration,
        }
    }
}

impl<T: FeatureFlags> FeatureFlags for Option<T> {
    fn is_enabled(&self, feature: Feature) -> bool {
        self.as_ref().is_some_and(|flags| flags.is_enabled(feature))
    }
}

/// Flag source with every feature switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticFlags(pub bool);

impl FeatureFlags for StaticFlags {
    fn is_enabled(&self, _feature: Feature) -> bool {
        self.0
    }
}
