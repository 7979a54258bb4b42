//! Error types for the User actor.

use crate::model::RoleId;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// A role id in the payload does not exist.
    #[error("Role does not exist: {0}")]
    UnknownRole(RoleId),

    #[error("User repository error: {0}")]
    Repository(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::Repository(msg)
    }
}
