//! Common test utilities for all integration tests.
//!
//! Provides user/team fixtures backed by an in-memory membership store.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

use teamguard::auth::{InMemoryMembershipStore, Membership, Role, Team, User};

/// Membership store plus helpers to create onboarded users.
pub struct Fixture {
    pub store: InMemoryMembershipStore,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self { store: InMemoryMembershipStore::new() }
    }

    /// A user with no team and no memberships.
    pub fn user(&self, name: &str) -> User {
        User::new(format!("{name}@example.com"), name)
    }

    /// A user who completed onboarding: they created their first team and
    /// administer it, and it is their current team.
    pub fn onboarded_user(&self, name: &str) -> (User, Team) {
        let team = Team::new(format!("{name}'s Team"));
        let user = self.user(name).with_current_team(team.id.clone());
        self.add_member(&user, &team, &[Role::Admin]);
        (user, team)
    }

    pub fn add_member(&self, user: &User, team: &Team, roles: &[Role]) -> Membership {
        let membership = roles
            .iter()
            .fold(Membership::new(user.id.clone(), team.id.clone()), |membership, role| {
                membership.with_role(*role)
            });
        self.store.insert(membership.clone()).expect("membership should be stored");
        membership
    }
}
