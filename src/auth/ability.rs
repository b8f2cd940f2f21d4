//! The authorization engine.
//!
//! An [`Ability`] is built for one subject and answers `can`/`cannot` queries
//! against a fixed, ordered rule table. A query is allowed when at least one
//! allow rule matches and no deny rule matches. Anything not covered by a rule
//! is denied.
//!
//! ```rust
//! use teamguard::auth::{Ability, Action, Membership, Role, Team, User};
//!
//! let team = Team::new("Platform");
//! let admin = User::new("ada@example.com", "Ada");
//! let membership = Membership::new(admin.id.clone(), team.id.clone()).with_role(Role::Admin);
//! let memberships = vec![membership];
//!
//! let ability = Ability::new(&admin, memberships.as_slice());
//! assert!(ability.can(Action::Manage, &team));
//! assert!(ability.cannot(Action::Manage, &Team::new("Elsewhere")));
//! ```

use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::auth::action::Action;
use crate::auth::features::{Feature, FeatureFlags};
use crate::auth::membership::{Membership, MembershipLookup, ResolvedMembership};
use crate::auth::models::AuthError;
use crate::auth::resource::{Resource, ResourceKind};
use crate::auth::user::User;
use crate::domain::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

/// Predicate a rule places on the subject and resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// The resource is the subject's own account
    IsSubject,
    /// The resource is a user sharing at least one team with the subject
    SharesTeam,
    /// The subject's roles in the resource's owning team grant the action
    TeamRole,
    /// The resource is an access token issued through provisioning
    Provisioned,
    /// The resource is an OAuth account connected by the subject
    OwnedBySubject,
    /// The resource is the subject's own membership
    OwnMembership,
}

/// One declarative permission rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub effect: Effect,
    pub actions: &'static [Action],
    pub kind: ResourceKind,
    pub conditions: &'static [Condition],
    pub feature: Option<Feature>,
}

impl Rule {
    const fn allow(
        actions: &'static [Action],
        kind: ResourceKind,
        conditions: &'static [Condition],
    ) -> Self {
        Self { effect: Effect::Allow, actions, kind, conditions, feature: None }
    }

    const fn deny(
        actions: &'static [Action],
        kind: ResourceKind,
        conditions: &'static [Condition],
    ) -> Self {
        Self { effect: Effect::Deny, actions, kind, conditions, feature: None }
    }

    const fn gated(self, feature: Feature) -> Self {
        Self { feature: Some(feature), ..self }
    }

    fn covers(&self, kind: ResourceKind, action: Action) -> bool {
        self.kind == kind && self.actions.iter().any(|granted| granted.implies(action))
    }
}

const MANAGE: &[Action] = &[Action::Manage];

/// The permission rule table, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule::allow(MANAGE, ResourceKind::User, &[Condition::IsSubject]),
    Rule::allow(&[Action::Read], ResourceKind::User, &[Condition::SharesTeam]),
    Rule::allow(MANAGE, ResourceKind::Team, &[Condition::TeamRole]),
    Rule::allow(MANAGE, ResourceKind::Membership, &[Condition::TeamRole]),
    // Leaving a team is not self-service yet.
    Rule::deny(&[Action::Destroy], ResourceKind::Membership, &[Condition::OwnMembership]),
    Rule::allow(MANAGE, ResourceKind::Invitation, &[Condition::TeamRole]),
    Rule::allow(MANAGE, ResourceKind::Application, &[Condition::TeamRole]),
    Rule::allow(
        MANAGE,
        ResourceKind::AccessToken,
        &[Condition::Provisioned, Condition::TeamRole],
    ),
    Rule::allow(MANAGE, ResourceKind::StripeInstallation, &[Condition::TeamRole])
        .gated(Feature::StripeIntegration),
    Rule::allow(
        &[Action::Read, Action::Create, Action::Destroy],
        ResourceKind::StripeAccount,
        &[Condition::OwnedBySubject],
    )
    .gated(Feature::StripeIntegration),
    Rule::allow(MANAGE, ResourceKind::Subscription, &[Condition::TeamRole])
        .gated(Feature::Billing),
];

/// Permission checker bound to a single subject.
///
/// Memberships are read from the lookup at most once, on first use. Build a
/// fresh `Ability` per request; an instance never observes role changes made
/// after it first loaded the subject's memberships.
pub struct Ability<'a, L: MembershipLookup + ?Sized> {
    subject: Option<&'a User>,
    lookup: &'a L,
    features: Option<&'a dyn FeatureFlags>,
    memberships: OnceCell<Vec<ResolvedMembership>>,
}

impl<'a, L: MembershipLookup + ?Sized> Ability<'a, L> {
    pub fn new(subject: &'a User, lookup: &'a L) -> Self {
        Self { subject: Some(subject), lookup, features: None, memberships: OnceCell::new() }
    }

    /// Ability for a request with no authenticated subject. Denies everything.
    pub fn anonymous(lookup: &'a L) -> Self {
        Self { subject: None, lookup, features: None, memberships: OnceCell::new() }
    }

    pub fn with_features(mut self, features: &'a dyn FeatureFlags) -> Self {
        self.features = Some(features);
        self
    }

    pub fn subject(&self) -> Option<&'a User> {
        self.subject
    }

    pub fn can<'r>(&self, action: Action, resource: impl Into<Resource<'r>>) -> bool {
        self.decide(action, resource.into())
    }

    pub fn cannot<'r>(&self, action: Action, resource: impl Into<Resource<'r>>) -> bool {
        !self.can(action, resource)
    }

    /// Check with an extra context object, as in `can?(:manage, user, team)`.
    /// The decision is made on `resource` alone.
    pub fn can_with<'r>(
        &self,
        action: Action,
        resource: impl Into<Resource<'r>>,
        context: Option<Resource<'_>>,
    ) -> bool {
        if let Some(context) = context {
            debug!(context_kind = %context.kind(), "ignoring extra context in permission check");
        }
        self.can(action, resource)
    }

    /// Kind-level check: could the subject perform `action` on some `kind`?
    ///
    /// Feature gates and role grants are evaluated; ownership and provisioning
    /// conditions depend on an instance and are assumed to be satisfiable.
    pub fn can_kind(&self, action: Action, kind: ResourceKind) -> bool {
        if self.subject.is_none() {
            return false;
        }

        RULES
            .iter()
            .filter(|rule| rule.effect == Effect::Allow && rule.covers(kind, action))
            .filter(|rule| self.feature_enabled(rule.feature))
            .any(|rule| {
                rule.conditions.iter().all(|condition| match condition {
                    Condition::TeamRole => self
                        .memberships()
                        .iter()
                        .any(|m| m.team_id().is_some() && m.grants(kind, action)),
                    Condition::IsSubject
                    | Condition::SharesTeam
                    | Condition::Provisioned
                    | Condition::OwnedBySubject
                    | Condition::OwnMembership => true,
                })
            })
    }

    /// Enforcement form of [`Ability::can`].
    pub fn authorize<'r>(
        &self,
        action: Action,
        resource: impl Into<Resource<'r>>,
    ) -> Result<(), AuthError> {
        let resource = resource.into();
        if self.subject.is_none() {
            return Err(AuthError::Unauthenticated);
        }
        if self.decide(action, resource) {
            Ok(())
        } else {
            Err(AuthError::Forbidden { action, kind: resource.kind() })
        }
    }

    /// Teams whose resources of `kind` the subject may act on with `action`.
    pub fn accessible_team_ids(&self, action: Action, kind: ResourceKind) -> Vec<TeamId> {
        let role_scoped = RULES.iter().any(|rule| {
            rule.effect == Effect::Allow
                && rule.covers(kind, action)
                && rule.conditions.contains(&Condition::TeamRole)
                && self.feature_enabled(rule.feature)
        });
        if !role_scoped || self.subject.is_none() {
            return Vec::new();
        }

        let teams: BTreeSet<TeamId> = self
            .memberships()
            .iter()
            .filter(|m| m.grants(kind, action))
            .filter_map(|m| m.team_id().cloned())
            .collect();
        teams.into_iter().collect()
    }

    /// Teams in which the subject holds an admin-level role.
    pub fn administered_team_ids(&self) -> Vec<TeamId> {
        let teams: BTreeSet<TeamId> = self
            .memberships()
            .iter()
            .filter(|m| m.is_admin())
            .filter_map(|m| m.team_id().cloned())
            .collect();
        teams.into_iter().collect()
    }

    fn decide(&self, action: Action, resource: Resource<'_>) -> bool {
        let kind = resource.kind();
        let Some(subject) = self.subject else {
            debug!(%action, %kind, allowed = false, "denying permission check without subject");
            return false;
        };

        let span = crate::decision_span!(action, kind, subject.id);
        if let Some(team_id) = resource.team_id() {
            span.record("team_id", tracing::field::display(team_id));
        }
        let _entered = span.entered();

        let mut allowed = false;
        for rule in RULES.iter().filter(|rule| rule.covers(kind, action)) {
            if !self.feature_enabled(rule.feature) {
                continue;
            }
            if !rule.conditions.iter().all(|c| self.holds(*c, subject, action, resource)) {
                continue;
            }
            match rule.effect {
                Effect::Deny => {
                    debug!(allowed = false, "permission denied by explicit rule");
                    return false;
                }
                Effect::Allow => allowed = true,
            }
        }

        debug!(allowed, "permission check evaluated");
        allowed
    }

    fn holds(
        &self,
        condition: Condition,
        subject: &User,
        action: Action,
        resource: Resource<'_>,
    ) -> bool {
        match condition {
            Condition::IsSubject => {
                resource.kind() == ResourceKind::User && self.owned_by(subject, resource)
            }
            Condition::SharesTeam => match resource {
                Resource::User(other) => self.shares_team(other),
                _ => false,
            },
            Condition::TeamRole => resource.team_id().is_some_and(|team_id| {
                self.memberships()
                    .iter()
                    .filter(|m| m.team_id() == Some(team_id))
                    .any(|m| m.grants(resource.kind(), action))
            }),
            Condition::Provisioned => {
                matches!(resource, Resource::AccessToken(token) if token.provisioned)
            }
            Condition::OwnedBySubject => {
                resource.kind() == ResourceKind::StripeAccount && self.owned_by(subject, resource)
            }
            Condition::OwnMembership => {
                resource.kind() == ResourceKind::Membership && self.owned_by(subject, resource)
            }
        }
    }

    fn owned_by(&self, subject: &User, resource: Resource<'_>) -> bool {
        resource.owner_user_id() == Some(&subject.id)
    }

    fn shares_team(&self, other: &User) -> bool {
        let others = match self.lookup.memberships_for(&other.id) {
            Ok(memberships) => memberships,
            Err(err) => {
                warn!(user_id = %other.id, error = %err, "membership lookup failed; denying");
                return false;
            }
        };

        others
            .iter()
            .filter(|m| m.belongs_to(&other.id))
            .filter_map(|m| m.team_id.as_ref())
            .any(|team_id| self.memberships().iter().any(|m| m.team_id() == Some(team_id)))
    }

    fn feature_enabled(&self, feature: Option<Feature>) -> bool {
        match feature {
            None => true,
            Some(feature) => self.features.is_some_and(|flags| flags.is_enabled(feature)),
        }
    }

    fn memberships(&self) -> &[ResolvedMembership] {
        self.memberships.get_or_init(|| {
            let Some(subject) = self.subject else {
                return Vec::new();
            };
            match self.lookup.memberships_for(&subject.id) {
                Ok(memberships) => memberships
                    .into_iter()
                    .filter(|m| m.belongs_to(&subject.id))
                    .map(Membership::resolve)
                    .collect(),
                Err(err) => {
                    warn!(user_id = %subject.id, error = %err, "membership lookup failed; denying");
                    Vec::new()
                }
            }
        })
    }
}
