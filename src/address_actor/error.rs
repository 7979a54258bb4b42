use crate::model::UserId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    #[error("User does not exist: {0}")]
    UnknownUser(UserId),

    #[error("Address repository error: {0}")]
    Repository(String),
}

impl From<String> for AddressError {
    fn from(msg: String) -> Self {
        AddressError::Repository(msg)
    }
}
