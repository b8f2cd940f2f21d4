//! Domain layer
//!
//! Pure identifier types shared by the tenant models and the authorization
//! engine. No storage or transport dependencies live here.

pub mod id;

pub use id::{
    AccessTokenId, ApplicationId, InstallationId, InvitationId, MembershipId, OAuthAccountId,
    SubscriptionId, TeamId, UserId,
};
