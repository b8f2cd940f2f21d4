//! Error types surfaced by the enforcement side of the authorization layer.

use thiserror::Error;

use crate::auth::action::Action;
use crate::auth::resource::ResourceKind;

/// Errors returned when a caller enforces a permission.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized: no authenticated subject")]
    Unauthenticated,
    #[error("forbidden: cannot {action} {kind}")]
    Forbidden { action: Action, kind: ResourceKind },
}

impl AuthError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::Forbidden { .. })
    }
}
