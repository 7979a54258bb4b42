use crate::model::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

entity_id!(AddressId, "address");

/// Shipping details. Shared by the stored record and the create payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddressDetails {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub surname: String,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub country: String,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub city: String,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub address: String,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 20))]
    pub postal_code: String,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 30))]
    pub phone_number: String,
}

/// A shipping address. Always owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub details: AddressDetails,
}

/// The details are flattened in JSON, so their errors are reported as top-level
/// fields rather than under `details`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressCreate {
    pub user_id: UserId,
    #[serde(flatten)]
    pub details: AddressDetails,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddressUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub surname: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub country: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub city: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub address: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 30))]
    pub phone_number: Option<String>,
}

impl Address {
    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

impl AddressDetails {
    /// Overwrites the fields present in `update`.
    pub fn apply(&mut self, update: AddressUpdate) {
        let AddressUpdate {
            name,
            surname,
            country,
            city,
            address,
            postal_code,
            phone_number,
        } = update;
        for (slot, value) in [
            (&mut self.name, name),
            (&mut self.surname, surname),
            (&mut self.country, country),
            (&mut self.city, city),
            (&mut self.address, address),
            (&mut self.postal_code, postal_code),
            (&mut self.phone_number, phone_number),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

impl Validate for AddressCreate {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.details.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> AddressDetails {
        AddressDetails {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            country: "UK".into(),
            city: "London".into(),
            address: "12 St James's Square".into(),
            postal_code: "SW1Y 4JH".into(),
            phone_number: "+44 20 7946 0000".into(),
        }
    }

    #[test]
    fn test_create_payload_is_flat() {
        let json = serde_json::json!({
            "user_id": 4,
            "name": "Ada", "surname": "Lovelace", "country": "UK", "city": "London",
            "address": "12 St James's Square", "postal_code": "SW1Y 4JH",
            "phone_number": "+44 20 7946 0000"
        });
        let create: AddressCreate = serde_json::from_value(json).unwrap();
        assert_eq!(create.user_id, UserId(4));
        assert_eq!(create.details, details());
        assert!(create.validate().is_ok());
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut d = details();
        d.apply(AddressUpdate {
            city: Some("Bath".into()),
            ..Default::default()
        });
        assert_eq!(d.city, "Bath");
        assert_eq!(d.name, "Ada");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut d = details();
        d.postal_code = "".into();
        let errors = crate::validation::ValidationErrors::from(d.validate().unwrap_err());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["postal_code"]);
        assert_eq!(errors.first_message(), Some("The postal code field is required."));
    }
}
