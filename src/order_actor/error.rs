//! Error types for the Order actor.

use crate::model::{AddressId, OrderStatus, ProductId, UserId};
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Everything except `Repository` is a rejection of the request itself and is shown
/// to the customer as-is.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("The order must contain at least one product.")]
    EmptyOrder,

    #[error("Quantity for {0} must be at least 1.")]
    InvalidQuantity(ProductId),

    #[error("User does not exist: {0}")]
    UnknownUser(UserId),

    /// The address does not exist or belongs to someone else.
    #[error("Address {0} is not one of your addresses.")]
    UnknownAddress(AddressId),

    #[error("Product does not exist: {0}")]
    UnknownProduct(ProductId),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}.")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("The order must be paid before it can be delivered.")]
    NotPaid,

    #[error("An order cannot move from {from} to {to}.")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An error occurred while talking to a repository.
    #[error("Order repository error: {0}")]
    Repository(String),
}

impl OrderError {
    /// True for rejections caused by the request rather than the system.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, OrderError::Repository(_))
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::Repository(msg)
    }
}
