//! Team domain models.

use serde::{Deserialize, Serialize};

use crate::domain::TeamId;

/// Represents a team, the tenant boundary for every team-scoped resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: TeamId::new(), name: name.into() }
    }
}

impl Default for Team {
    fn default() -> Self {
        Self::new("")
    }
}
