//! Team roles and the permission data attached to each of them.
//!
//! Memberships persist role *ids*, not roles. Ids are resolved against the
//! closed [`Role`] catalog at check time so that unsaved or partially loaded
//! memberships behave exactly like stored ones. Ids that do not resolve grant
//! nothing.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use crate::auth::action::Action;
use crate::auth::resource::ResourceKind;

/// Persisted role identifier as stored on a membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Role> for RoleId {
    fn from(role: Role) -> Self {
        role.id()
    }
}

/// Named permission bundle held through a team membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Baseline role every member holds
    Default,
    /// Full control over the team and its resources
    Admin,
    /// Builds against the platform API on behalf of the team
    Developer,
}

const DEFAULT_GRANTS: &[(ResourceKind, Action)] = &[
    (ResourceKind::Team, Action::Read),
    (ResourceKind::Membership, Action::Read),
    (ResourceKind::Invitation, Action::Read),
    (ResourceKind::Application, Action::Read),
    (ResourceKind::Subscription, Action::Read),
];

const DEVELOPER_GRANTS: &[(ResourceKind, Action)] =
    &[(ResourceKind::Application, Action::Manage)];

const ADMIN_GRANTS: &[(ResourceKind, Action)] = &[
    (ResourceKind::Team, Action::Manage),
    (ResourceKind::Membership, Action::Manage),
    (ResourceKind::Invitation, Action::Manage),
    (ResourceKind::Application, Action::Manage),
    (ResourceKind::AccessToken, Action::Manage),
    (ResourceKind::StripeInstallation, Action::Manage),
    (ResourceKind::Subscription, Action::Manage),
];

impl Role {
    pub const ALL: [Role; 3] = [Role::Default, Role::Admin, Role::Developer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Default => "default",
            Role::Admin => "admin",
            Role::Developer => "developer",
        }
    }

    pub fn id(&self) -> RoleId {
        RoleId::new(self.as_str())
    }

    /// Resolve a persisted id. Unknown ids resolve to `None`.
    pub fn from_id(id: &RoleId) -> Option<Role> {
        id.as_str().parse().ok()
    }

    /// Whether this role confers team administration.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Roles whose permissions this role also carries.
    pub fn includes(&self) -> &'static [Role] {
        match self {
            Role::Default => &[],
            Role::Admin | Role::Developer => &[Role::Default],
        }
    }

    /// Permission data declared directly on this role.
    pub fn grants(&self) -> &'static [(ResourceKind, Action)] {
        match self {
            Role::Default => DEFAULT_GRANTS,
            Role::Admin => ADMIN_GRANTS,
            Role::Developer => DEVELOPER_GRANTS,
        }
    }

    /// Whether this role, or a role it includes, allows `action` on `kind`.
    pub fn grants_action(&self, kind: ResourceKind, action: Action) -> bool {
        let direct = self
            .grants()
            .iter()
            .any(|(granted_kind, granted)| *granted_kind == kind && granted.implies(action));

        direct || self.includes().iter().any(|role| role.grants_action(kind, action))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Role::Default),
            "admin" => Ok(Role::Admin),
            "developer" => Ok(Role::Developer),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// Error returned when role parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);
