//! Handlers for routes that are not plain CRUD.

use super::auth::Caller;
use super::json_body;
use crate::model::{Ability, AddressDetails, CustomerReview, OrderId, PlaceOrder, ProductId, ProductImageId};
use crate::response::{ApiError, ApiResult};
use crate::service::{
    AccountService, CartRequest, CartService, ImageUpload, IntentBody, OrderService, PaymentService,
    ProductImageService, Registration, ReviewService,
};
use crate::state::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::warn;

const IMAGE_SCOPE: &str = "product_images";

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// --- account ---

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> ApiResult {
    AccountService::new(state).register(json_body(payload)?).await
}

pub async fn me(State(state): State<AppState>, caller: Caller) -> ApiResult {
    AccountService::new(state).me(caller.user()?).await
}

pub async fn my_addresses(State(state): State<AppState>, caller: Caller) -> ApiResult {
    AccountService::new(state).my_addresses(caller.user()?).await
}

pub async fn add_address(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<AddressDetails>, JsonRejection>,
) -> ApiResult {
    let user = caller.user()?;
    AccountService::new(state).add_address(user, json_body(payload)?).await
}

// --- orders ---

pub async fn my_orders(State(state): State<AppState>, caller: Caller) -> ApiResult {
    OrderService::new(state).mine(caller.user()?).await
}

pub async fn place_order(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<PlaceOrder>, JsonRejection>,
) -> ApiResult {
    let user = caller.user()?;
    OrderService::new(state).place(user, json_body(payload)?).await
}

pub async fn pay_order(State(state): State<AppState>, caller: Caller, Path(id): Path<u32>) -> ApiResult {
    OrderService::new(state).mark_paid(caller.user()?, OrderId(id)).await
}

pub async fn deliver_order(State(state): State<AppState>, caller: Caller, Path(id): Path<u32>) -> ApiResult {
    caller.authorize(&state, Ability::Edit, "orders").await?;
    OrderService::new(state).mark_delivered(OrderId(id)).await
}

// --- reviews, payments, cart ---

pub async fn post_review(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u32>,
    payload: Result<Json<CustomerReview>, JsonRejection>,
) -> ApiResult {
    let user = caller.user()?;
    ReviewService::new(state)
        .post(user, ProductId(id), json_body(payload)?)
        .await
}

pub async fn create_payment_intent(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<IntentBody>, JsonRejection>,
) -> ApiResult {
    let user = caller.user()?;
    PaymentService::new(state).create_intent(user, json_body(payload)?).await
}

pub async fn cart_summary(
    State(state): State<AppState>,
    payload: Result<Json<CartRequest>, JsonRejection>,
) -> ApiResult {
    CartService::new(state).summary(json_body(payload)?).await
}

// --- product images ---

/// The file in the `image` part, if any. Bodies that are not multipart count as empty.
async fn image_part(multipart: Result<Multipart, MultipartRejection>) -> Result<Option<ImageUpload>, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Ok(None);
    };
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "Malformed multipart body");
                return Err(ApiError::bad_request(e.body_text()));
            }
        };
        if field.name() != Some("image") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(ImageUpload {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
}

pub async fn product_images(State(state): State<AppState>, Path(id): Path<u32>) -> ApiResult {
    ProductImageService::new(state).list_for_product(ProductId(id)).await
}

pub async fn store_image(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    caller.authorize(&state, Ability::Create, IMAGE_SCOPE).await?;
    let upload = image_part(multipart).await?;
    ProductImageService::new(state).store(ProductId(id), upload).await
}

pub async fn update_image(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<u32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    caller.authorize(&state, Ability::Edit, IMAGE_SCOPE).await?;
    let upload = image_part(multipart).await?;
    ProductImageService::new(state).update(ProductImageId(id), upload).await
}

pub async fn destroy_image(State(state): State<AppState>, caller: Caller, Path(id): Path<u32>) -> ApiResult {
    caller.authorize(&state, Ability::Delete, IMAGE_SCOPE).await?;
    ProductImageService::new(state).destroy(ProductImageId(id)).await
}
