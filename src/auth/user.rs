//! User accounts: the subjects whose permissions the engine evaluates.

use serde::{Deserialize, Serialize};

use crate::domain::{TeamId, UserId};

/// Stored representation of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    /// Active tenant context, if the user has picked one
    pub current_team_id: Option<TeamId>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: Self::normalize_email(&email.into()),
            name: name.into(),
            current_team_id: None,
        }
    }

    pub fn with_current_team(mut self, team_id: TeamId) -> Self {
        self.current_team_id = Some(team_id);
        self
    }

    /// Normalize email to lowercase for consistent storage and comparison.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
