//! # Order Actor
//!
//! Orders are the one repository whose `on_create` does real work: it checks the buyer
//! and the shipping address, reserves stock for every line and prices the order from
//! the catalog. See [`OrderContext`] for the repositories it consults.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::model::Order;
use resource_store::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(capacity)
}
