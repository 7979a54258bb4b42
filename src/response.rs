//! JSON envelopes.
//!
//! Success: `{"data": ...}`, optionally with a `"message"`. Failure: `{"message": ...}`,
//! plus `"errors"` for validation failures. Services return
//! `Result<Reply, ApiError>`; both sides render themselves as axum responses.

use crate::validation::ValidationErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// A successful outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

fn to_value(data: impl Serialize) -> Value {
    // views are plain structs of strings and numbers; serialization cannot fail
    serde_json::to_value(data).unwrap_or(Value::Null)
}

impl Reply {
    /// 200 `{data}`
    pub fn ok(data: impl Serialize) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "data": to_value(data) }),
        }
    }

    /// 200 `{message, data}`
    pub fn ok_with_message(message: impl Into<String>, data: impl Serialize) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "message": message.into(), "data": to_value(data) }),
        }
    }

    /// 201 `{message, data}`
    pub fn created(message: impl Into<String>, data: impl Serialize) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: json!({ "message": message.into(), "data": to_value(data) }),
        }
    }

    /// `{message}` with any status.
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    /// Raw body, for endpoints with their own shape (e.g. `{clientSecret}`).
    pub fn raw(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn message_text(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// A failed outcome. Logging is the caller's job; constructing one logs nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<ValidationErrors>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthenticated.")
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "This action is unauthorized.")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 422 `{message: <first error>, errors: {...}}`
    pub fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: errors.to_string(),
            errors: Some(errors),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::validation(errors)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::validation(errors.into())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            message: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            errors: Option<ValidationErrors>,
        }

        (
            self.status,
            Json(ErrorBody {
                message: self.message,
                errors: self.errors,
            }),
        )
            .into_response()
    }
}

pub type ApiResult = Result<Reply, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelopes() {
        let reply = Reply::created("Product created successfully.", json!({"id": 1}));
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.body["data"]["id"], 1);
        assert_eq!(reply.message_text(), Some("Product created successfully."));

        let list = Reply::ok(Vec::<u32>::new());
        assert_eq!(list.body, json!({"data": []}));
    }

    #[test]
    fn test_validation_error_uses_first_message() {
        let err = ApiError::validation(ValidationErrors::single("name", "The name field is required."));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "The name field is required.");
    }
}
