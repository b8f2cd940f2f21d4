//! Resources the engine can be asked about.
//!
//! [`Resource`] is a closed tagged union over every model the rule table knows.
//! New resource types must be added here, which forces the rule interpreter's
//! matches to be revisited.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::auth::billing::Subscription;
use crate::auth::integration::{StripeAccount, StripeInstallation};
use crate::auth::invitation::Invitation;
use crate::auth::membership::Membership;
use crate::auth::platform::{AccessToken, Application};
use crate::auth::team::Team;
use crate::auth::user::User;
use crate::domain::{TeamId, UserId};

/// Type-level tag for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    User,
    Team,
    Membership,
    Invitation,
    Application,
    AccessToken,
    StripeInstallation,
    StripeAccount,
    Subscription,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Team => "team",
            ResourceKind::Membership => "membership",
            ResourceKind::Invitation => "invitation",
            ResourceKind::Application => "platform_application",
            ResourceKind::AccessToken => "platform_access_token",
            ResourceKind::StripeInstallation => "stripe_installation",
            ResourceKind::StripeAccount => "stripe_account",
            ResourceKind::Subscription => "subscription",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A borrowed resource instance.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    User(&'a User),
    Team(&'a Team),
    Membership(&'a Membership),
    Invitation(&'a Invitation),
    Application(&'a Application),
    AccessToken(&'a AccessToken),
    StripeInstallation(&'a StripeInstallation),
    StripeAccount(&'a StripeAccount),
    Subscription(&'a Subscription),
}

impl<'a> Resource<'a> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::User(_) => ResourceKind::User,
            Resource::Team(_) => ResourceKind::Team,
            Resource::Membership(_) => ResourceKind::Membership,
            Resource::Invitation(_) => ResourceKind::Invitation,
            Resource::Application(_) => ResourceKind::Application,
            Resource::AccessToken(_) => ResourceKind::AccessToken,
            Resource::StripeInstallation(_) => ResourceKind::StripeInstallation,
            Resource::StripeAccount(_) => ResourceKind::StripeAccount,
            Resource::Subscription(_) => ResourceKind::Subscription,
        }
    }

    /// Owning team, following the owner chain. `None` for resources that are
    /// not team-scoped or whose chain is broken.
    pub fn team_id(&self) -> Option<&'a TeamId> {
        match *self {
            Resource::Team(team) => Some(&team.id),
            Resource::Membership(membership) => membership.team_id.as_ref(),
            Resource::Invitation(invitation) => invitation.team_id.as_ref(),
            Resource::Application(application) => application.team_id.as_ref(),
            Resource::AccessToken(token) => token.team_id(),
            Resource::StripeInstallation(installation) => installation.team_id.as_ref(),
            Resource::Subscription(subscription) => subscription.team_id.as_ref(),
            Resource::User(_) | Resource::StripeAccount(_) => None,
        }
    }

    /// User that directly owns this resource, if ownership is per user.
    pub fn owner_user_id(&self) -> Option<&'a UserId> {
        match *self {
            Resource::User(user) => Some(&user.id),
            Resource::Membership(membership) => membership.user_id.as_ref(),
            Resource::StripeAccount(account) => account.user_id.as_ref(),
            Resource::Team(_)
            | Resource::Invitation(_)
            | Resource::Application(_)
            | Resource::AccessToken(_)
            | Resource::StripeInstallation(_)
            | Resource::Subscription(_) => None,
        }
    }
}

macro_rules! impl_from_model {
    ($($model:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $model> for Resource<'a> {
                fn from(model: &'a $model) -> Self {
                    Resource::$model(model)
                }
            }
        )*
    };
}

impl_from_model!(
    User,
    Team,
    Membership,
    Invitation,
    Application,
    AccessToken,
    StripeInstallation,
    StripeAccount,
    Subscription,
);
