//! # teamguard
//!
//! Authorization core for a multi-tenant SaaS application. Given the acting
//! user, it decides whether an action on a tenant-owned resource is permitted.
//!
//! ## Architecture
//!
//! ```text
//! Request handler → Ability (rule table) → MembershipLookup / FeatureFlags
//!                          ↓
//!                  Role catalog + action lattice
//! ```
//!
//! ## Core Components
//!
//! - **Ability**: per-subject permission checker evaluating a fixed rule table
//! - **Role catalog**: `default`, `admin` and `developer` roles with per-kind grants
//! - **Resources**: closed tagged union over every tenant model, with owner
//!   chains resolved to a team
//! - **Settings**: feature flags and logging configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use teamguard::auth::{Ability, Action, Invitation, Membership, Role, Team, User};
//!
//! let team = Team::new("Platform");
//! let ada = User::new("ada@example.com", "Ada").with_current_team(team.id.clone());
//! let memberships = vec![Membership::new(ada.id.clone(), team.id.clone()).with_role(Role::Admin)];
//!
//! let ability = Ability::new(&ada, &memberships);
//! let invitation = Invitation::new(team.id.clone(), "bob@example.com");
//! assert!(ability.can(Action::Manage, &invitation));
//! assert!(ability.authorize(Action::Destroy, &invitation).is_ok());
//! ```

pub mod auth;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;

// Re-export commonly used types and traits
pub use auth::{
    Ability, Action, AuthError, Feature, FeatureFlags, InMemoryMembershipStore,
    MembershipLookup, Resource, ResourceKind, Role, RoleId,
};
pub use config::Settings;
pub use errors::{Error, Result};
pub use observability::init_logging;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
