//! Bearer token payload decoding.
//!
//! The signature is not checked here; the backend verifies it on every
//! request. The client only reads the payload to know who is logged in and
//! which views to offer.

use crate::role::Role;
use crate::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use pasapas_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// Claims the storefront reads from the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub id: UserId,
    /// Account role.
    pub role: Role,
    /// Expiry as a Unix timestamp, when the backend sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Decode the payload segment of a JWT.
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let mut segments = token.trim().split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
            _ => return Err(AuthError::InvalidToken("expected three segments".into())),
        };

        // Some issuers pad the payload even though JWTs should not.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Whether `exp` is at or before `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Build an unsigned token carrying `claims`. Used by tests and fakes.
pub fn encode_unsigned(claims: &Claims) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap_or_default());
    format!("{}.{}.sig", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_numeric_id() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"id":12,"role":3,"iat":1700000000}"#);
        let token = format!("eyJhbGciOiJIUzI1NiJ9.{}.c2ln", payload);
        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.id.as_str(), "12");
        assert_eq!(claims.role, Role::Client);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_round_trip_through_unsigned_token() {
        let claims = Claims {
            id: UserId::new("5"),
            role: Role::Seller,
            exp: Some(2_000_000_000),
        };
        assert_eq!(Claims::decode(&encode_unsigned(&claims)).unwrap(), claims);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Claims::decode("not-a-token").is_err());
        assert!(Claims::decode("a.!!!.c").is_err());
        let payload = URL_SAFE_NO_PAD.encode(br#"{"id":1,"role":7}"#);
        assert!(Claims::decode(&format!("h.{}.s", payload)).is_err());
    }

    #[test]
    fn test_expiry() {
        let claims = Claims {
            id: UserId::new("1"),
            role: Role::Client,
            exp: Some(100),
        };
        assert!(claims.is_expired(100));
        assert!(!claims.is_expired(99));
    }
}
