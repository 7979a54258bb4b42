use crate::model::ChildCategoryId;
use crate::validation::creatable_slug;
use serde::Deserialize;
use validator::{Validate, ValidationError};

entity_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

/// A catalog entry with its stock level.
///
/// `discount` is a percentage (0 to 100) taken off `price`. `total_quantities` is the
/// stock still available; orders reserve from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub product_code: String,
    pub price: f64,
    pub discount: f64,
    pub description: String,
    pub special_offer: bool,
    pub total_quantities: u32,
    pub child_category_id: ChildCategoryId,
}

/// Payload for creating a new product. `slug` is derived from `name` when absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "product_slug"))]
pub struct ProductCreate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 64))]
    pub product_code: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount: f64,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default)]
    pub special_offer: bool,
    pub total_quantities: u32,
    pub child_category_id: ChildCategoryId,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::usable_slug"), length(max = 255))]
    pub slug: Option<String>,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 64))]
    pub product_code: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub discount: Option<f64>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub special_offer: Option<bool>,
    pub total_quantities: Option<u32>,
    pub child_category_id: Option<ChildCategoryId>,
}

impl Product {
    /// Unit price after the percentage discount.
    pub fn discounted_price(&self) -> f64 {
        self.price - self.price * self.discount / 100.0
    }

    pub fn in_stock(&self) -> bool {
        self.total_quantities > 0
    }
}

fn product_slug(payload: &ProductCreate) -> Result<(), ValidationError> {
    creatable_slug(&payload.name, payload.slug.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrors;

    fn create() -> ProductCreate {
        ProductCreate {
            name: "Trail Runner".into(),
            slug: None,
            product_code: "TR-100".into(),
            price: 120.0,
            discount: 25.0,
            description: String::new(),
            special_offer: false,
            total_quantities: 8,
            child_category_id: ChildCategoryId(1),
        }
    }

    #[test]
    fn test_numbers_are_range_checked() {
        let mut payload = create();
        payload.price = -1.0;
        payload.discount = 120.0;
        let errors = ValidationErrors::from(payload.validate().unwrap_err());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["discount", "price"]);
        assert_eq!(errors.first_message(), Some("The discount must be between 0 and 100."));
    }

    #[test]
    fn test_slug_must_be_canonical() {
        let mut payload = create();
        payload.slug = Some("Trail Runner".into());
        assert!(payload.validate().is_err());
        payload.slug = Some("trail-runner".into());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_numeric_name_needs_explicit_slug() {
        let mut payload = create();
        payload.name = "404".into();
        let errors = ValidationErrors::from(payload.validate().unwrap_err());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["slug"]);

        payload.slug = Some(String::new());
        assert!(payload.validate().is_err());

        payload.slug = Some("error-404".into());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_numeric_or_empty_slug() {
        for slug in ["", "2024"] {
            let update = ProductUpdate {
                slug: Some(slug.into()),
                ..Default::default()
            };
            let errors = ValidationErrors::from(update.validate().unwrap_err());
            assert_eq!(errors.first_message(), Some("The slug must contain at least one letter."));
        }
    }

    #[test]
    fn test_update_accepts_partial_payload() {
        let update: ProductUpdate = serde_json::from_str(r#"{"price": 99.5}"#).unwrap();
        assert!(update.validate().is_ok());
        assert_eq!(update.price, Some(99.5));
        assert!(update.name.is_none());
    }
}
