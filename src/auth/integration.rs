//! Third-party integrations: team-level installations and the user-owned OAuth
//! accounts that back them.

use serde::{Deserialize, Serialize};

use crate::domain::{InstallationId, OAuthAccountId, TeamId, UserId};

/// A Stripe account connected by a user through OAuth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeAccount {
    pub id: OAuthAccountId,
    pub user_id: Option<UserId>,
    /// Provider-side account id (e.g. `acct_...`)
    pub uid: String,
}

impl StripeAccount {
    pub fn new(user_id: UserId, uid: impl Into<String>) -> Self {
        Self { id: OAuthAccountId::new(), user_id: Some(user_id), uid: uid.into() }
    }
}

/// A Stripe installation attached to a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeInstallation {
    pub id: InstallationId,
    pub team_id: Option<TeamId>,
    pub oauth_account_id: Option<OAuthAccountId>,
}

impl StripeInstallation {
    pub fn new(team_id: TeamId) -> Self {
        Self { id: InstallationId::new(), team_id: Some(team_id), oauth_account_id: None }
    }

    pub fn with_account(mut self, account: &StripeAccount) -> Self {
        self.oauth_account_id = Some(account.id.clone());
        self
    }
}
