//! Review repository.

pub mod entity;
pub mod error;

pub use entity::ReviewContext;
pub use error::*;

use crate::model::Review;
use resource_store::{ResourceActor, ResourceClient};

pub fn new(capacity: usize) -> (ResourceActor<Review>, ResourceClient<Review>) {
    ResourceActor::new(capacity)
}
