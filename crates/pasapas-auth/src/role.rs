//! Account roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role, carried in the token as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    /// Back-office administrator (code 1).
    Admin,
    /// Seller listing products (code 2).
    Seller,
    /// Customer buying products (code 3).
    Client,
}

impl Role {
    /// Wire code.
    pub fn code(&self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Seller => 2,
            Role::Client => 3,
        }
    }

    /// Parse a wire code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Role::Admin),
            2 => Some(Role::Seller),
            3 => Some(Role::Client),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Seller => "seller",
            Role::Client => "client",
        }
    }

    /// Whether accounts of this role can be created from the register form.
    pub fn can_register(&self) -> bool {
        matches!(self, Role::Seller | Role::Client)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "1" => Ok(Role::Admin),
            "seller" | "vendeur" | "2" => Ok(Role::Seller),
            "client" | "3" => Ok(Role::Client),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Role::from_code(code).ok_or_else(|| format!("unknown role code {}", code))
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Role::from_code(1), Some(Role::Admin));
        assert_eq!(Role::from_code(2), Some(Role::Seller));
        assert_eq!(Role::from_code(3), Some(Role::Client));
        assert_eq!(Role::from_code(4), None);
    }

    #[test]
    fn test_serde_as_integer() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "2");
        let role: Role = serde_json::from_str("3").unwrap();
        assert_eq!(role, Role::Client);
        assert!(serde_json::from_str::<Role>("9").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Seller".parse::<Role>(), Ok(Role::Seller));
        assert_eq!("3".parse::<Role>(), Ok(Role::Client));
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_can_register() {
        assert!(Role::Client.can_register());
        assert!(!Role::Admin.can_register());
    }
}
