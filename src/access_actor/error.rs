use crate::model::PermissionId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    #[error("Permission does not exist: {0}")]
    UnknownPermission(PermissionId),

    #[error("Access repository error: {0}")]
    Repository(String),
}

impl From<String> for AccessError {
    fn from(msg: String) -> Self {
        AccessError::Repository(msg)
    }
}
