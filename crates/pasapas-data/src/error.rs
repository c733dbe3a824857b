//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response. `message` is the backend's own text when it sent one.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 or 403.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// The message the backend sent, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            FetchError::HttpError { message, .. } if !message.is_empty() => Some(message),
            FetchError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message() {
        let err = FetchError::HttpError {
            status: 409,
            message: "Email already used".into(),
        };
        assert_eq!(err.backend_message(), Some("Email already used"));
        assert!(!err.is_unauthorized());
        assert_eq!(FetchError::Timeout.backend_message(), None);
    }

    #[test]
    fn test_unauthorized() {
        let err = FetchError::HttpError {
            status: 401,
            message: String::new(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.backend_message(), None);
    }
}
