//! Bearer-token authentication and permission checks.
//!
//! [`resolve_caller`] runs on every request and stores a [`Caller`] in the request
//! extensions. Handlers take `Caller` as an extractor and ask it for a user
//! ([`Caller::user`], 401) or for a permission ([`Caller::authorize`], 401/403).

use crate::lifecycle::has_permission;
use crate::model::{Ability, User};
use crate::response::ApiError;
use crate::service::crud::UNEXPECTED;
use crate::state::AppState;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;
use tracing::{debug, error};

/// Who is making the request. `None` for anonymous requests and unknown tokens.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<User>);

impl Caller {
    /// The authenticated user, or 401.
    pub fn user(&self) -> Result<&User, ApiError> {
        self.0.as_ref().ok_or_else(ApiError::unauthenticated)
    }

    /// The authenticated user if it holds `admin_{ability}_{scope}`; 401 or 403 otherwise.
    pub async fn authorize(
        &self,
        state: &AppState,
        ability: Ability,
        scope: &str,
    ) -> Result<&User, ApiError> {
        let user = self.user()?;
        let granted = has_permission(&state.repos, user, ability, scope)
            .await
            .map_err(|e| {
                error!(error = %e, "Permission check failed");
                ApiError::internal(UNEXPECTED)
            })?;
        if !granted {
            debug!(user = %user.id, ?ability, scope, "Permission denied");
            return Err(ApiError::forbidden());
        }
        Ok(user)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware resolving the `Authorization: Bearer <access_token>` header.
pub async fn resolve_caller(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let caller = match bearer_token(request.headers()) {
        None => Caller(None),
        Some(token) => match state.repos.user_client().find_by_token(token).await {
            Ok(user) => Caller(user),
            Err(e) => {
                error!(error = %e, "Token lookup failed");
                return ApiError::internal(UNEXPECTED).into_response();
            }
        },
    };
    request.extensions_mut().insert(caller);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer  xyz "));
        assert_eq!(bearer_token(&headers), Some("xyz"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
