use crate::model::{AddressId, ProductId, UserId};
use crate::validation::with_message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

entity_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// Fulfilment state. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Delivered,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Delivered => "delivered",
        })
    }
}

/// One product in an order, priced at the moment the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub discount: f64,
}

/// A placed order.
///
/// Totals are computed by the order repository from catalog prices when the order is
/// created; clients only choose products and quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Public reference shown to customers, `ORD-` + 12 hex digits.
    pub order_id: String,
    pub user_id: UserId,
    pub address_id: AddressId,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub products_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub is_delivered: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A requested product and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for creating an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub address_id: AddressId,
    pub lines: Vec<LineRequest>,
}

/// Body of `POST /api/orders`; the buyer comes from the token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlaceOrder {
    pub address_id: AddressId,
    #[validate(custom(function = "valid_lines"))]
    pub items: Vec<LineRequest>,
}

/// Admin update. Status changes must move forward.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn belongs_to(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// New random public reference.
    pub fn new_reference() -> String {
        let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        format!("ORD-{}", &hex[..12])
    }
}

/// Folds repeated products into one line, keeping first-seen order.
pub fn merge_lines(lines: &[LineRequest]) -> Vec<LineRequest> {
    let mut merged: Vec<LineRequest> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(*line),
        }
    }
    merged
}

/// At least one line, and no zero quantities.
pub(crate) fn valid_lines(lines: &[LineRequest]) -> Result<(), ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::new("required"));
    }
    if lines.iter().any(|l| l.quantity == 0) {
        return Err(with_message("quantity", "Every quantity must be at least 1."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        let reference = Order::new_reference();
        assert_eq!(reference.len(), 16);
        assert!(reference.starts_with("ORD-"));
        assert!(reference[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_merge_lines() {
        let line = |p, q| LineRequest {
            product_id: ProductId(p),
            quantity: q,
        };
        let merged = merge_lines(&[line(2, 1), line(1, 3), line(2, 4)]);
        assert_eq!(merged, vec![line(2, 5), line(1, 3)]);
    }

    #[test]
    fn test_status_order_and_json() {
        assert!(OrderStatus::Pending < OrderStatus::Paid);
        assert!(OrderStatus::Paid < OrderStatus::Delivered);
        assert_eq!(
            serde_json::to_value(OrderStatus::Delivered).unwrap(),
            serde_json::json!("delivered")
        );
    }

    #[test]
    fn test_empty_or_zero_lines_rejected() {
        let empty = PlaceOrder {
            address_id: AddressId(1),
            items: vec![],
        };
        let errors = crate::validation::ValidationErrors::from(empty.validate().unwrap_err());
        assert_eq!(errors.first_message(), Some("The items field is required."));
        let zero = PlaceOrder {
            address_id: AddressId(1),
            items: vec![LineRequest {
                product_id: ProductId(1),
                quantity: 0,
            }],
        };
        let errors = crate::validation::ValidationErrors::from(zero.validate().unwrap_err());
        assert_eq!(errors.first_message(), Some("Every quantity must be at least 1."));
    }
}
