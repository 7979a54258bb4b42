//! # Generic CRUD service
//!
//! One implementation of `list/show/store/update/destroy` shared by every entity. The
//! entity's [`Resource`] impl supplies the label used in messages, the repository and
//! the views; validation comes from the payload's [`Validate`] impl.
//!
//! | Operation | Success | Failure |
//! |-----------|---------|---------|
//! | `list` | 200 `{data: [..]}`, also when empty | 500 |
//! | `show` | 200 `{data}` | 404 `"{E} not found."`, 500 |
//! | `store` | 201 `"{E} created successfully."` | 422 invalid, 500 `"Failed to create {E}."` |
//! | `update` | 200 `"{E} updated successfully."` | 422 invalid or `"Failed to update {E}."`, 500 |
//! | `destroy` | 200 `"{E} deleted successfully."` | 404, 500 `"Failed to delete {E}."` |

use crate::resource::Resource;
use crate::response::{ApiError, ApiResult, Reply};
use crate::state::AppState;
use crate::validation::Validate;
use axum::http::StatusCode;
use resource_store::{Filter, FrameworkError, ResourceClient};
use std::marker::PhantomData;
use tracing::{error, info, instrument, warn};

/// Message for failures whose cause is only logged.
pub const UNEXPECTED: &str = "An unexpected error occurred.";

pub(crate) fn not_found<T: Resource>() -> ApiError {
    ApiError::not_found(format!("{} not found.", T::LABEL))
}

pub struct CrudService<T: Resource> {
    state: AppState,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for CrudService<T> {
    fn clone(&self) -> Self {
        Self::new(self.state.clone())
    }
}

impl<T: Resource> CrudService<T> {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            _entity: PhantomData,
        }
    }

    fn repository(&self) -> &ResourceClient<T> {
        T::repository(&self.state.repos)
    }

    #[instrument(skip(self), fields(entity_type = T::LABEL))]
    pub async fn list(&self) -> ApiResult {
        let records = self.repository().list().await.map_err(|e| {
            error!(error = %e, "Listing failed");
            ApiError::internal(UNEXPECTED)
        })?;

        let mut views = Vec::with_capacity(records.len());
        for record in &records {
            views.push(record.index_view(&self.state).await);
        }
        Ok(Reply::ok(views))
    }

    /// Looks up a record by numeric id, or by slug for entities that have one.
    pub async fn find(&self, key: &str) -> Result<Option<T>, FrameworkError> {
        match key.parse::<u32>() {
            Ok(raw) => self.repository().get(T::Id::from(raw)).await,
            Err(_) => {
                let slug = key.to_string();
                self.repository()
                    .find_one(Filter::new(move |r: &T| r.slug() == Some(slug.as_str())))
                    .await
            }
        }
    }

    #[instrument(skip(self), fields(entity_type = T::LABEL))]
    pub async fn show(&self, key: &str) -> ApiResult {
        match self.find(key).await {
            Ok(Some(record)) => Ok(Reply::ok(record.show_view(&self.state).await)),
            Ok(None) => Err(not_found::<T>()),
            Err(e) => {
                error!(key, error = %e, "Lookup failed");
                Err(ApiError::internal(UNEXPECTED))
            }
        }
    }

    #[instrument(skip(self, payload), fields(entity_type = T::LABEL))]
    pub async fn store(&self, payload: T::Create) -> ApiResult
    where
        T::Create: Validate,
    {
        payload.validate()?;
        T::check_create(&payload, &self.state).await?;

        let id = self.repository().create(payload).await.map_err(|e| {
            error!(error = %e, "Create failed");
            ApiError::internal(format!("Failed to create {}.", T::LABEL))
        })?;
        info!(%id, "Stored");

        let message = format!("{} created successfully.", T::LABEL);
        match self.repository().get(id.clone()).await {
            Ok(Some(record)) => Ok(Reply::created(message, record.show_view(&self.state).await)),
            other => {
                // the record exists; only rendering it back failed
                warn!(%id, outcome = ?other.err(), "Created record could not be read back");
                Ok(Reply::created(message, serde_json::Value::Null))
            }
        }
    }

    #[instrument(skip(self, payload), fields(entity_type = T::LABEL))]
    pub async fn update(&self, id: T::Id, payload: T::Update) -> ApiResult
    where
        T::Update: Validate,
    {
        payload.validate()?;
        T::check_update(&id, &payload, &self.state).await?;

        let failed = || format!("Failed to update {}.", T::LABEL);
        match self.repository().update(id.clone(), payload).await {
            Ok(record) => Ok(Reply::ok_with_message(
                format!("{} updated successfully.", T::LABEL),
                record.show_view(&self.state).await,
            )),
            Err(e) if e.is_unavailable() => {
                error!(%id, error = %e, "Update failed");
                Err(ApiError::internal(failed()))
            }
            Err(e) => {
                warn!(%id, error = %e, "Update rejected");
                Err(ApiError::unprocessable(failed()))
            }
        }
    }

    #[instrument(skip(self), fields(entity_type = T::LABEL))]
    pub async fn destroy(&self, id: T::Id) -> ApiResult {
        match self.repository().delete(id.clone()).await {
            Ok(()) => Ok(Reply::message(
                StatusCode::OK,
                format!("{} deleted successfully.", T::LABEL),
            )),
            Err(e) if e.is_not_found() => Err(not_found::<T>()),
            Err(e) => {
                error!(%id, error = %e, "Delete failed");
                Err(ApiError::internal(format!("Failed to delete {}.", T::LABEL)))
            }
        }
    }
}
