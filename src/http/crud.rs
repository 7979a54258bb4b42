//! Generic handlers behind every `/api/{entity}` route.

use super::auth::Caller;
use super::json_body;
use crate::model::Ability;
use crate::resource::Resource;
use crate::response::ApiResult;
use crate::service::CrudService;
use crate::state::AppState;
use crate::validation::Validate;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;

async fn authorize_read<T: Resource>(state: &AppState, caller: &Caller) -> Result<(), crate::response::ApiError> {
    if !T::PUBLIC_READ {
        caller.authorize(state, Ability::View, T::SCOPE).await?;
    }
    Ok(())
}

pub async fn index<T: Resource>(State(state): State<AppState>, caller: Caller) -> ApiResult {
    authorize_read::<T>(&state, &caller).await?;
    CrudService::<T>::new(state).list().await
}

pub async fn show<T: Resource>(
    State(state): State<AppState>,
    caller: Caller,
    Path(key): Path<String>,
) -> ApiResult {
    authorize_read::<T>(&state, &caller).await?;
    CrudService::<T>::new(state).show(&key).await
}

pub async fn store<T>(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<T::Create>, JsonRejection>,
) -> ApiResult
where
    T: Resource,
    T::Create: DeserializeOwned + Validate,
{
    caller.authorize(&state, Ability::Create, T::SCOPE).await?;
    let payload = json_body(payload)?;
    CrudService::<T>::new(state).store(payload).await
}

pub async fn update<T>(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u32>,
    payload: Result<Json<T::Update>, JsonRejection>,
) -> ApiResult
where
    T: Resource,
    T::Update: DeserializeOwned + Validate,
{
    caller.authorize(&state, Ability::Edit, T::SCOPE).await?;
    let payload = json_body(payload)?;
    CrudService::<T>::new(state).update(T::Id::from(id), payload).await
}

pub async fn destroy<T: Resource>(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u32>,
) -> ApiResult {
    caller.authorize(&state, Ability::Delete, T::SCOPE).await?;
    CrudService::<T>::new(state).destroy(T::Id::from(id)).await
}
