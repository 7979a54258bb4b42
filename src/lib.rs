//! # Storefront
//!
//! > **Catalog, cart, checkout and back-office API on resource actors.**
//!
//! Every entity (users, products, orders, ...) lives in its own `ResourceActor` from the
//! `resource-store` crate. Services sit on top of the actor clients, resources shape
//! records into JSON, and an axum router exposes the lot.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Records ([`model`]) and their repositories (`*_actor`)
//! Plain structs plus their create/update payloads. Each `*_actor` module implements
//! `ActorEntity` for one record: construction, referential checks against other
//! repositories, and custom actions such as stock reservation.
//!
//! ### 2. Orchestration ([`lifecycle`])
//! - [`StoreSystem`](lifecycle::StoreSystem) starts and wires every actor.
//! - [`seed_access_control`](lifecycle::seed_access_control) creates the permission catalogue.
//! - [`setup_tracing`](lifecycle::setup_tracing) installs the log subscriber.
//!
//! ### 3. Use cases ([`service`]) and presentation ([`resource`])
//! One generic [`CrudService`](service::CrudService) serves every entity; checkout,
//! images, payments and accounts have their own services.
//!
//! ### 4. Edge ([`http`])
//! Routes, bearer-token authentication and permission checks.
//!
//! ## 🚀 Running
//!
//! ```bash
//! STOREFRONT_ADMIN_EMAIL=admin@example.com STOREFRONT_ADMIN_TOKEN=secret \
//!     RUST_LOG=info cargo run
//! ```

pub mod access_actor;
pub mod address_actor;
pub mod category_actor;
pub mod clients;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod payment;
pub mod pricing;
pub mod product_actor;
pub mod product_image_actor;
pub mod resource;
pub mod response;
pub mod review_actor;
pub mod service;
pub mod state;
pub mod storage;
pub mod user_actor;
pub mod validation;
