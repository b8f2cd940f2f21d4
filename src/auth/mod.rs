//! Authorization module entry point.
//!
//! This module exposes the tenant models, the role catalog, and the
//! [`Ability`] engine that decides what a user may do with them.

pub mod ability;
pub mod action;
pub mod billing;
pub mod features;
pub mod integration;
pub mod invitation;
pub mod membership;
pub mod models;
pub mod platform;
pub mod resource;
pub mod role;
pub mod team;
pub mod user;

pub use ability::{Ability, Condition, Effect, Rule, RULES};
pub use action::{Action, ActionParseError};
pub use billing::Subscription;
pub use features::{Feature, FeatureFlags, StaticFlags};
pub use integration::{StripeAccount, StripeInstallation};
pub use invitation::Invitation;
pub use membership::{InMemoryMembershipStore, Membership, MembershipLookup, ResolvedMembership};
pub use models::AuthError;
pub use platform::{AccessToken, Application};
pub use resource::{Resource, ResourceKind};
pub use role::{Role, RoleId, RoleParseError};
pub use team::Team;
pub use user::User;
