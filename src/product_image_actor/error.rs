use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductImageError {
    #[error("Product does not exist: {0}")]
    UnknownProduct(ProductId),

    #[error("Product image repository error: {0}")]
    Repository(String),
}

impl From<String> for ProductImageError {
    fn from(msg: String) -> Self {
        ProductImageError::Repository(msg)
    }
}
