//! Invitations to join a team.

use serde::{Deserialize, Serialize};

use crate::auth::user::User;
use crate::domain::{InvitationId, TeamId};

/// Pending invitation for an email address to join a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: InvitationId,
    pub team_id: Option<TeamId>,
    pub email: String,
}

impl Invitation {
    pub fn new(team_id: TeamId, email: impl Into<String>) -> Self {
        Self {
            id: InvitationId::new(),
            team_id: Some(team_id),
            email: User::normalize_email(&email.into()),
        }
    }
}
