use crate::model::ParentCategoryId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Parent category does not exist: {0}")]
    UnknownParent(ParentCategoryId),

    #[error("Category repository error: {0}")]
    Repository(String),
}

impl From<String> for CategoryError {
    fn from(msg: String) -> Self {
        CategoryError::Repository(msg)
    }
}
