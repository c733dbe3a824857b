//! Authentication module for Pas à Pas.
//!
//! Holds the bearer token issued by the backend, reads the account id and
//! role from it, and guards role-specific views.

mod claims;
mod credentials;
mod error;
mod role;
mod session;

pub use claims::{encode_unsigned, Claims};
pub use credentials::{Credentials, Registration};
pub use error::AuthError;
pub use role::Role;
pub use session::{AuthSession, User};
