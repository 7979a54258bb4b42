//! Error types for the Product actor.

use crate::model::{ChildCategoryId, ProductId};
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The product's category does not exist.
    #[error("Child category does not exist: {0}")]
    UnknownCategory(ChildCategoryId),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    /// Zero-unit reservations are refused.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// An error occurred while talking to a repository.
    #[error("Product repository error: {0}")]
    Repository(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::Repository(msg)
    }
}
