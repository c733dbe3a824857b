//! Account module.
//!
//! Client and seller profile forms.

mod profile;

pub use profile::{ClientProfile, SellerProfile, CLIENT_GENDERS};
