//! Storefront errors, as a view sees them.

use pasapas_auth::AuthError;
use pasapas_cache::CacheError;
use pasapas_commerce::CommerceError;
use pasapas_data::FetchError;
use thiserror::Error;

/// What went wrong with a user action.
///
/// Every variant is terminal for the action that raised it; nothing is
/// retried.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Input rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// No session, a bad token, or the wrong role.
    #[error(transparent)]
    Authentication(AuthError),

    /// The backend call failed. `message` is what the view shows.
    #[error("{message}")]
    Remote {
        message: String,
        #[source]
        source: Option<FetchError>,
    },

    /// Payment could not be prepared or was refused.
    #[error("{0}")]
    Payment(String),

    /// Local storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] CacheError),
}

impl StorefrontError {
    /// A remote failure shown as `message`, whatever the cause.
    pub fn remote(message: impl Into<String>, source: FetchError) -> Self {
        StorefrontError::Remote {
            message: message.into(),
            source: Some(source),
        }
    }

    /// A remote failure shown with the backend's own text, or `fallback`.
    pub fn from_backend(source: FetchError, fallback: &str) -> Self {
        let message = source
            .backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        StorefrontError::Remote {
            message,
            source: Some(source),
        }
    }

    /// Text for the inline message next to the triggering action.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Storage(_) => "Something went wrong saving your data.".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the view should send the user to the login page.
    pub fn requires_login(&self) -> bool {
        match self {
            StorefrontError::Authentication(e) => e.requires_login(),
            StorefrontError::Remote {
                source: Some(source),
                ..
            } => source.status() == Some(401),
            _ => false,
        }
    }

    pub fn is_payment(&self) -> bool {
        matches!(self, StorefrontError::Payment(_))
    }
}

impl From<AuthError> for StorefrontError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(message) => StorefrontError::Validation(message),
            AuthError::Cache(e) => StorefrontError::Storage(e),
            other => StorefrontError::Authentication(other),
        }
    }
}

impl From<CommerceError> for StorefrontError {
    fn from(e: CommerceError) -> Self {
        StorefrontError::Validation(e.to_string())
    }
}

impl From<FetchError> for StorefrontError {
    fn from(e: FetchError) -> Self {
        StorefrontError::from_backend(e, "Something went wrong. Please try again.")
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_session_requires_login() {
        let err = StorefrontError::from(AuthError::NotAuthenticated);
        assert!(err.requires_login());
        assert_eq!(err.user_message(), "You must be logged in");
    }

    #[test]
    fn test_auth_validation_is_validation() {
        let err = StorefrontError::from(AuthError::Validation("Missing required fields: email".into()));
        assert!(matches!(err, StorefrontError::Validation(_)));
        assert!(!err.requires_login());
    }

    #[test]
    fn test_backend_message_is_shown() {
        let err = StorefrontError::from(FetchError::HttpError {
            status: 409,
            message: "Email already used".into(),
        });
        assert_eq!(err.user_message(), "Email already used");
    }

    #[test]
    fn test_fallback_message() {
        let err = StorefrontError::from_backend(FetchError::Timeout, "Registration failed");
        assert_eq!(err.user_message(), "Registration failed");
    }

    #[test]
    fn test_unauthorized_remote_requires_login() {
        let err = StorefrontError::from(FetchError::HttpError {
            status: 401,
            message: String::new(),
        });
        assert!(err.requires_login());
    }

    #[test]
    fn test_empty_cart_is_validation() {
        let err = StorefrontError::from(CommerceError::EmptyCart);
        assert_eq!(err.user_message(), "Your cart is empty");
    }
}
