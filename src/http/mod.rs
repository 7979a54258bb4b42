//! # HTTP surface
//!
//! The axum router. Catalog reads are public; every other route needs a bearer token
//! and, for admin routes, the matching `admin_{ability}_{scope}` permission.

pub mod auth;
pub mod crud;
pub mod handlers;

use crate::model::{
    Address, ChildCategory, Order, ParentCategory, Permission, Product, Review, Role, User,
};
use crate::resource::Resource;
use crate::response::ApiError;
use crate::state::AppState;
use crate::validation::Validate;
use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Uploads larger than this are refused before reaching a handler.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Unwraps a JSON body, turning axum's plain-text rejection into a JSON error.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))
}

/// `GET|POST {base}` and `GET|PUT|DELETE {base}/{id}`.
fn crud_routes<T>(router: Router<AppState>, base: &str) -> Router<AppState>
where
    T: Resource,
    T::Create: DeserializeOwned + Validate,
    T::Update: DeserializeOwned + Validate,
{
    router
        .route(base, get(crud::index::<T>).post(crud::store::<T>))
        .route(
            &format!("{base}/{{id}}"),
            get(crud::show::<T>)
                .put(crud::update::<T>)
                .delete(crud::destroy::<T>),
        )
}

fn api_routes() -> Router<AppState> {
    let mut router = Router::new();
    router = crud_routes::<Product>(router, "/api/products");
    router = crud_routes::<ParentCategory>(router, "/api/parent_categories");
    router = crud_routes::<ChildCategory>(router, "/api/child_categories");
    router = crud_routes::<Review>(router, "/api/reviews");
    router = crud_routes::<User>(router, "/api/users");
    router = crud_routes::<Address>(router, "/api/addresses");
    router = crud_routes::<Role>(router, "/api/roles");
    router = crud_routes::<Permission>(router, "/api/permissions");

    router
        // orders are created by customers, not through the admin CRUD
        .route(
            "/api/orders",
            get(crud::index::<Order>).post(handlers::place_order),
        )
        .route(
            "/api/orders/{id}",
            get(crud::show::<Order>)
                .put(crud::update::<Order>)
                .delete(crud::destroy::<Order>),
        )
        .route("/api/orders/{id}/pay", put(handlers::pay_order))
        .route("/api/orders/{id}/deliver", put(handlers::deliver_order))
        .route(
            "/api/products/{id}/images",
            get(handlers::product_images).post(handlers::store_image),
        )
        .route(
            "/api/product_images/{id}",
            put(handlers::update_image).delete(handlers::destroy_image),
        )
        .route("/api/products/{id}/reviews", post(handlers::post_review))
        .route("/api/register", post(handlers::register))
        .route("/api/me", get(handlers::me))
        .route(
            "/api/me/addresses",
            get(handlers::my_addresses).post(handlers::add_address),
        )
        .route("/api/me/orders", get(handlers::my_orders))
        .route("/api/payment_intents", post(handlers::create_payment_intent))
        .route("/api/cart/summary", post(handlers::cart_summary))
}

/// The complete application.
pub fn router(state: AppState) -> Router {
    let files = ServeDir::new(state.storage.root());
    let prefix = state.storage.public_prefix().to_string();

    api_routes()
        .route("/health", get(handlers::health))
        .layer(from_fn_with_state(state.clone(), auth::resolve_caller))
        .nest_service(&prefix, files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
