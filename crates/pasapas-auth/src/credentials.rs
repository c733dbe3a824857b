//! Login and registration payloads.

use crate::role::Role;
use crate::AuthError;
use serde::{Deserialize, Serialize};

/// Body for `POST /auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Reject blank or malformed input before it is sent.
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut missing = Vec::new();
        if self.email.is_empty() {
            missing.push("email");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(AuthError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if !looks_like_email(&self.email) {
            return Err(AuthError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        Ok(())
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Body for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(flatten)]
    pub credentials: Credentials,
    pub role: Role,
}

impl Registration {
    pub fn new(credentials: Credentials, role: Role) -> Self {
        Self { credentials, role }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        self.credentials.validate()?;
        if !self.role.can_register() {
            return Err(AuthError::Validation(format!(
                "{} accounts cannot be created here",
                self.role
            )));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
