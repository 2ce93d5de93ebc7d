use thiserror::Error;

use crate::{Permission, UserProfile};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(&'static str),
}

/// Authorize a profile for one action.
///
/// - No IO
/// - No panics
/// - Pure role lookup
pub fn authorize(profile: &UserProfile, required: Permission) -> Result<(), AuthzError> {
    if required.granted_to(profile.role) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %profile.id,
            role = %profile.role,
            permission = required.as_str(),
            "authorization denied"
        );
        Err(AuthzError::Forbidden(required.as_str()))
    }
}
