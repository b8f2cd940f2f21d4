//! Billing records owned by a team.

use serde::{Deserialize, Serialize};

use crate::domain::{SubscriptionId, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub team_id: Option<TeamId>,
    pub plan: String,
}

impl Subscription {
    pub fn new(team_id: TeamId, plan: impl Into<String>) -> Self {
        Self { id: SubscriptionId::new(), team_id: Some(team_id), plan: plan.into() }
    }
}
