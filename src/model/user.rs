use crate::model::RoleId;
use serde::Deserialize;
use std::fmt;
use validator::Validate;

entity_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

/// A registered customer or administrator.
///
/// `api_token` is the bearer token presented in `Authorization` headers. It is never
/// part of a rendered resource except once, in the registration response.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub api_token: String,
    pub role_ids: Vec<RoleId>,
}

/// Payload for creating a user.
#[derive(Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub role_ids: Vec<RoleId>,
    /// Fixed token for seeded accounts. Generated when absent.
    #[serde(skip)]
    pub api_token: Option<String>,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role_ids", &self.role_ids)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Payload for updating a user. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role_ids: Option<Vec<RoleId>>,
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role_ids: Vec::new(),
            api_token: None,
        }
    }
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
