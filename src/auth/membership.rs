//! Team memberships and the lookup seam the authorization engine reads them through.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::action::Action;
use crate::auth::resource::ResourceKind;
use crate::auth::role::{Role, RoleId};
use crate::domain::{MembershipId, TeamId, UserId};
use crate::errors::{Error, Result};

/// A user's membership in one team.
///
/// `team_id` and `user_id` are optional so that unsaved memberships (for
/// example one being built in a form) can still be checked. A membership with
/// no team never grants anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: MembershipId,
    pub team_id: Option<TeamId>,
    pub user_id: Option<UserId>,
    pub role_ids: Vec<RoleId>,
}

impl Membership {
    pub fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self {
            id: MembershipId::new(),
            team_id: Some(team_id),
            user_id: Some(user_id),
            role_ids: Vec::new(),
        }
    }

    /// An unsaved membership with no user, team, or roles.
    pub fn unsaved() -> Self {
        Self { id: MembershipId::new(), team_id: None, user_id: None, role_ids: Vec::new() }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role_ids.push(role.id());
        self
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Roles held through this membership. The default role is always present;
    /// ids that do not resolve are skipped.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = vec![Role::Default];
        for role_id in &self.role_ids {
            match Role::from_id(role_id) {
                Some(role) if !roles.contains(&role) => roles.push(role),
                Some(_) => {}
                None => warn!(
                    membership_id = %self.id,
                    role_id = %role_id,
                    "ignoring unknown role id on membership"
                ),
            }
        }
        roles
    }

    pub fn belongs_to(&self, user_id: &UserId) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    /// Resolve role ids once so repeated checks reuse the result.
    pub fn resolve(self) -> ResolvedMembership {
        let roles = self.roles();
        ResolvedMembership { membership: self, roles }
    }
}

/// A membership whose role ids have been resolved against the role catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMembership {
    membership: Membership,
    roles: Vec<Role>,
}

impl ResolvedMembership {
    pub fn team_id(&self) -> Option<&TeamId> {
        self.membership.team_id.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(Role::is_admin)
    }

    pub fn grants(&self, kind: ResourceKind, action: Action) -> bool {
        self.roles.iter().any(|role| role.grants_action(kind, action))
    }
}

/// Source of the memberships held by a subject.
pub trait MembershipLookup: Send + Sync {
    fn memberships_for(&self, user_id: &UserId) -> Result<Vec<Membership>>;
}

impl MembershipLookup for [Membership] {
    fn memberships_for(&self, user_id: &UserId) -> Result<Vec<Membership>> {
        Ok(self.iter().filter(|m| m.belongs_to(user_id)).cloned().collect())
    }
}

impl MembershipLookup for Vec<Membership> {
    fn memberships_for(&self, user_id: &UserId) -> Result<Vec<Membership>> {
        self.as_slice().memberships_for(user_id)
    }
}

/// Concurrent in-memory membership store indexed by user.
///
/// Writers and readers may run on different threads; each lookup returns a
/// snapshot of the user's memberships at that moment.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    by_user: DashMap<UserId, Vec<Membership>>,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a membership. It must name both a user and a team.
    ///
    /// A membership already stored under the same id is replaced, even when
    /// it was filed under a different user.
    pub fn insert(&self, membership: Membership) -> Result<()> {
        let user_id = membership
            .user_id
            .clone()
            .ok_or_else(|| Error::validation_field("membership has no user", "user_id"))?;
        if membership.team_id.is_none() {
            return Err(Error::validation_field("membership has no team", "team_id"));
        }

        self.remove(&membership.id);
        let mut entry = self.by_user.entry(user_id).or_default();
        entry.value_mut().push(membership);
        Ok(())
    }

    /// Remove a membership by id, returning it if present.
    pub fn remove(&self, membership_id: &MembershipId) -> Option<Membership> {
        for mut entry in self.by_user.iter_mut() {
            if let Some(pos) = entry.value().iter().position(|m| &m.id == membership_id) {
                return Some(entry.value_mut().remove(pos));
            }
        }
        None
    }

    /// Add `role` to the user's membership in `team_id`.
    pub fn grant_role(&self, user_id: &UserId, team_id: &TeamId, role: Role) -> Result<()> {
        let mut entry = self
            .by_user
            .get_mut(user_id)
            .ok_or_else(|| Error::lookup(format!("user {user_id} has no memberships")))?;
        let membership = entry
            .value_mut()
            .iter_mut()
            .find(|m| m.team_id.as_ref() == Some(team_id))
            .ok_or_else(|| {
                Error::lookup(format!("user {user_id} is not a member of team {team_id}"))
            })?;

        let role_id = role.id();
        if !membership.role_ids.contains(&role_id) {
            membership.role_ids.push(role_id);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_user.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MembershipLookup for InMemoryMembershipStore {
    fn memberships_for(&self, user_id: &UserId) -> Result<Vec<Membership>> {
        Ok(self.by_user.get(user_id).map(|entry| entry.value().clone()).unwrap_or_default())
    }
}
