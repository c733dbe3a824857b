//! Client and seller profiles.

use crate::error::CommerceError;
use crate::wire::opt_string;
use serde::{Deserialize, Serialize};

/// Gender choices offered on the client profile form.
pub const CLIENT_GENDERS: [&str; 2] = ["Homme", "Femme"];

/// A client's profile (`/clients/profile`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientProfile {
    #[serde(rename = "nom", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "genre", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "adresse", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "code_postal", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "ville", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "telephone", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ClientProfile {
    /// Check the fields the profile form marks as required.
    pub fn validate(&self) -> Result<(), CommerceError> {
        CommerceError::require(&[
            ("last name", self.last_name.as_deref()),
            ("first name", self.first_name.as_deref()),
            ("gender", self.gender.as_deref()),
            ("postal code", self.postal_code.as_deref()),
            ("city", self.city.as_deref()),
            ("phone", self.phone.as_deref()),
        ])
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Overwrite fields that `update` carries.
    pub fn merge(&mut self, update: ClientProfile) {
        merge_field(&mut self.last_name, update.last_name);
        merge_field(&mut self.first_name, update.first_name);
        merge_field(&mut self.gender, update.gender);
        merge_field(&mut self.address, update.address);
        merge_field(&mut self.postal_code, update.postal_code);
        merge_field(&mut self.city, update.city);
        merge_field(&mut self.phone, update.phone);
    }
}

/// A seller's profile (`/sellers/profile`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SellerProfile {
    #[serde(rename = "nom", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "prenom", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "raison_sociale", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    /// Bank account (RIB).
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub rib: Option<String>,
    #[serde(rename = "adresse_siege", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub head_office_address: Option<String>,
    #[serde(rename = "ville", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "code_postal", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "email_contact", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(rename = "telephone_contact", default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl SellerProfile {
    /// Check the fields the profile form marks as required.
    pub fn validate(&self) -> Result<(), CommerceError> {
        CommerceError::require(&[
            ("last name", self.last_name.as_deref()),
            ("first name", self.first_name.as_deref()),
            ("company name", self.company_name.as_deref()),
            ("city", self.city.as_deref()),
            ("postal code", self.postal_code.as_deref()),
        ])
    }

    pub fn full_name(&self) -> String {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// Overwrite fields that `update` carries.
    pub fn merge(&mut self, update: SellerProfile) {
        merge_field(&mut self.last_name, update.last_name);
        merge_field(&mut self.first_name, update.first_name);
        merge_field(&mut self.company_name, update.company_name);
        merge_field(&mut self.siret, update.siret);
        merge_field(&mut self.rib, update.rib);
        merge_field(&mut self.head_office_address, update.head_office_address);
        merge_field(&mut self.city, update.city);
        merge_field(&mut self.postal_code, update.postal_code);
        merge_field(&mut self.contact_email, update.contact_email);
        merge_field(&mut self.contact_phone, update.contact_phone);
    }
}

fn merge_field(current: &mut Option<String>, update: Option<String>) {
    if update.is_some() {
        *current = update;
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_wire_names() {
        let profile = ClientProfile {
            last_name: Some("Martin".into()),
            first_name: Some("Léa".into()),
            postal_code: Some("69001".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            json!({"nom": "Martin", "prenom": "Léa", "code_postal": "69001"})
        );
    }

    #[test]
    fn test_client_validation() {
        let err = ClientProfile::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: last name, first name, gender, postal code, city, phone"
        );
    }

    #[test]
    fn test_seller_validation_ignores_optional_fields() {
        let seller = SellerProfile {
            last_name: Some("Dupont".into()),
            first_name: Some("Marc".into()),
            company_name: Some("Sneak SARL".into()),
            city: Some("Paris".into()),
            postal_code: Some("75011".into()),
            ..Default::default()
        };
        assert!(seller.validate().is_ok());
    }

    #[test]
    fn test_decode_numeric_postal_code() {
        let p: ClientProfile =
            serde_json::from_value(json!({"id_client": 3, "code_postal": 69001, "ville": "Lyon"}))
                .unwrap();
        assert_eq!(p.postal_code.as_deref(), Some("69001"));
    }

    #[test]
    fn test_merge_and_name() {
        let mut p = ClientProfile {
            first_name: Some("Léa".into()),
            last_name: Some("Martin".into()),
            city: Some("Lyon".into()),
            ..Default::default()
        };
        p.merge(ClientProfile {
            city: Some("Nantes".into()),
            ..Default::default()
        });
        assert_eq!(p.city.as_deref(), Some("Nantes"));
        assert_eq!(p.full_name(), "Léa Martin");
    }
}
