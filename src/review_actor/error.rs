use crate::model::{ProductId, UserId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Product does not exist: {0}")]
    UnknownProduct(ProductId),

    #[error("User does not exist: {0}")]
    UnknownUser(UserId),

    #[error("Review repository error: {0}")]
    Repository(String),
}

impl From<String> for ReviewError {
    fn from(msg: String) -> Self {
        ReviewError::Repository(msg)
    }
}
