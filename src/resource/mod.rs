//! # Resources (presentation layer)
//!
//! A [`Resource`] says how one entity is exposed over HTTP: its human label for
//! messages, the permission scope guarding it, how to find its repository and how to
//! render it for lists (`index_view`) and for a single record (`show_view`).
//!
//! Views fetch related records themselves. A relation that no longer exists, or whose
//! repository cannot be reached, renders as `null`.

mod access;
mod address;
mod catalog;
mod order;
mod review;

pub use access::*;
pub use address::*;
pub use catalog::*;
pub use order::*;
pub use review::*;

use crate::lifecycle::Repositories;
use crate::response::ApiError;
use crate::state::AppState;
use async_trait::async_trait;
use resource_store::{ActorEntity, Filter, ResourceClient};
use serde::Serialize;
use tracing::warn;

#[async_trait]
pub trait Resource: ActorEntity {
    /// Singular label used in messages, e.g. `"Product"` in "Product not found.".
    const LABEL: &'static str;

    /// Permission scope, e.g. `"products"` for `admin_edit_products`.
    const SCOPE: &'static str;

    /// Lists and single records may be read without a token.
    const PUBLIC_READ: bool = false;

    type IndexView: Serialize + Send;
    type ShowView: Serialize + Send;

    fn repository(repos: &Repositories) -> &ResourceClient<Self>;

    /// Alternative key accepted by `show`.
    fn slug(&self) -> Option<&str> {
        None
    }

    async fn index_view(&self, state: &AppState) -> Self::IndexView;

    async fn show_view(&self, state: &AppState) -> Self::ShowView;

    /// Store-time checks that need the repositories, such as uniqueness.
    async fn check_create(_payload: &Self::Create, _state: &AppState) -> Result<(), ApiError> {
        Ok(())
    }

    /// Update-time counterpart of [`Resource::check_create`].
    async fn check_update(
        _id: &Self::Id,
        _payload: &Self::Update,
        _state: &AppState,
    ) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Loads a related record for rendering. Failures are logged and render as absent.
pub(crate) async fn related<T: ActorEntity>(client: &ResourceClient<T>, id: T::Id) -> Option<T> {
    match client.get(id.clone()).await {
        Ok(found) => found,
        Err(e) => {
            warn!(%id, error = %e, "Related record unavailable");
            None
        }
    }
}

/// Related records matching `filter`; empty when the repository fails.
pub(crate) async fn related_many<T: ActorEntity>(client: &ResourceClient<T>, filter: Filter<T>) -> Vec<T> {
    client.find(filter).await.unwrap_or_else(|e| {
        warn!(error = %e, "Related records unavailable");
        Vec::new()
    })
}

/// 422 naming `field` when another record already matches `filter`.
pub(crate) async fn ensure_unique<T: ActorEntity>(
    client: &ResourceClient<T>,
    filter: Filter<T>,
    field: &str,
) -> Result<(), ApiError> {
    let taken = client
        .count(filter)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Uniqueness check failed");
            ApiError::internal("An unexpected error occurred.")
        })?;
    if taken > 0 {
        let message = format!("The {} has already been taken.", field.replace('_', " "));
        return Err(crate::validation::ValidationErrors::single(field, message).into());
    }
    Ok(())
}
