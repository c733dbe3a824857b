//! Authentication errors.

use crate::role::Role;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login refused by the backend.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// No session.
    #[error("You must be logged in")]
    NotAuthenticated,

    /// Token could not be decoded.
    #[error("token invalid: {0}")]
    InvalidToken(String),

    /// Token past its `exp` claim.
    #[error("token expired")]
    TokenExpired,

    /// Logged in with the wrong role for this view.
    #[error("this page requires a {required} account")]
    InsufficientPermissions { required: Role, actual: Role },

    /// Form input rejected before submission.
    #[error("{0}")]
    Validation(String),

    /// Token storage failed.
    #[error("cache error: {0}")]
    Cache(#[from] pasapas_cache::CacheError),
}

impl AuthError {
    /// Whether the caller should send the user to the login view.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired
                | AuthError::InsufficientPermissions { .. }
        )
    }

    /// Check if this is a permission error.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, AuthError::InsufficientPermissions { .. })
    }
}
