//! Session management.

use crate::claims::Claims;
use crate::role::Role;
use crate::AuthError;
use pasapas_cache::{cache_key, Cache, Slot};
use pasapas_commerce::ids::UserId;
use std::time::{SystemTime, UNIX_EPOCH};

/// The logged-in account, as read from the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub role: Role,
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// Bearer-token session, persisted in the cache.
///
/// Created once at startup with [`AuthSession::restore`]; every view reads
/// the same instance.
#[derive(Debug)]
pub struct AuthSession {
    slot: Slot<String>,
    token: Option<String>,
    user: Option<User>,
}

impl AuthSession {
    /// Restore the session saved in `cache`, if any.
    ///
    /// A stored token that no longer decodes, or has expired, is discarded.
    pub fn restore(cache: Cache) -> Result<Self, AuthError> {
        let slot = Slot::new(cache, cache_key!("auth", "token"));
        let mut session = Self {
            slot,
            token: None,
            user: None,
        };

        if let Some(token) = session.slot.load()? {
            match decode_current(&token) {
                Ok(claims) => {
                    session.user = Some(claims.into());
                    session.token = Some(token);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding stored token");
                    session.slot.clear()?;
                }
            }
        }
        Ok(session)
    }

    /// Adopt `token`: decode it, persist it, and return the user.
    pub fn login(&mut self, token: &str) -> Result<&User, AuthError> {
        let claims = decode_current(token)?;
        self.slot.save(&token.to_string())?;
        tracing::info!(user = %claims.id, role = %claims.role, "logged in");
        self.token = Some(token.to_string());
        Ok(self.user.insert(claims.into()))
    }

    /// Forget the token.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.slot.clear()?;
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.id, "logged out");
        }
        self.token = None;
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The user and token, or [`AuthError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<(&User, &str), AuthError> {
        match (self.user.as_ref(), self.token.as_deref()) {
            (Some(user), Some(token)) => Ok((user, token)),
            _ => Err(AuthError::NotAuthenticated),
        }
    }

    /// Guard a view that needs `role`.
    pub fn require_role(&self, role: Role) -> Result<&User, AuthError> {
        let (user, _) = self.require_user()?;
        if user.role != role {
            return Err(AuthError::InsufficientPermissions {
                required: role,
                actual: user.role,
            });
        }
        Ok(user)
    }
}

fn decode_current(token: &str) -> Result<Claims, AuthError> {
    let claims = Claims::decode(token)?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    if claims.is_expired(now) {
        return Err(AuthError::TokenExpired);
    }
    Ok(claims)
}
