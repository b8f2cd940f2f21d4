//! Actions a subject can request against a resource.
//!
//! Actions form a small lattice: `manage` sits above every other action, and the
//! remaining actions are unrelated to each other.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Every action on the resource
    Manage,
    Read,
    Create,
    Update,
    Destroy,
}

impl Action {
    /// All actions, `Manage` first.
    pub const ALL: [Action; 5] =
        [Action::Manage, Action::Read, Action::Create, Action::Update, Action::Destroy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Destroy => "destroy",
        }
    }

    /// Whether holding `self` is enough to perform `other`.
    pub fn implies(self, other: Action) -> bool {
        self == other || self == Action::Manage
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manage" => Ok(Action::Manage),
            "read" => Ok(Action::Read),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "destroy" => Ok(Action::Destroy),
            other => Err(ActionParseError(other.to_string())),
        }
    }
}

/// Error returned when action parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid action: {0}")]
pub struct ActionParseError(pub String);
