//! Platform API applications and the access tokens issued to them.
//!
//! Access tokens do not point at a team themselves; ownership resolves through
//! the application the token was issued for.

use serde::{Deserialize, Serialize};

use crate::domain::{AccessTokenId, ApplicationId, TeamId};

/// A platform application registered by a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub team_id: Option<TeamId>,
    pub name: String,
}

impl Application {
    pub fn new(team_id: TeamId, name: impl Into<String>) -> Self {
        Self { id: ApplicationId::new(), team_id: Some(team_id), name: name.into() }
    }
}

/// An access token issued for a platform application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub id: AccessTokenId,
    pub application: Option<Application>,
    /// Issued through the controlled provisioning flow rather than self-service
    pub provisioned: bool,
}

impl AccessToken {
    pub fn new(application: Application, provisioned: bool) -> Self {
        Self { id: AccessTokenId::new(), application: Some(application), provisioned }
    }

    /// Owning team, resolved through the application.
    pub fn team_id(&self) -> Option<&TeamId> {
        self.application.as_ref().and_then(|app| app.team_id.as_ref())
    }
}
