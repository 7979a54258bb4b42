//! # Product Actor
//!
//! Catalog repository with inventory. Beyond CRUD it answers the stock actions in
//! [`ProductAction`]:
//!
//! ```rust,ignore
//! let left = products.check_stock(id).await?;
//! products.reserve_stock(id, 2).await?;   // fails with InsufficientStock
//! products.release_stock(id, 2).await?;
//! ```
//!
//! Products reference a child category, so the actor runs with the child category
//! client as its context.
//!
//! ## Structure
//!
//! - [`entity`] - `ActorEntity` implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use resource_store::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(capacity)
}
