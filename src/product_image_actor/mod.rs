//! Product image records. Files themselves live in
//! [`ImageStorage`](crate::storage::ImageStorage); this repository only tracks them.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::ProductImage;
use resource_store::{ResourceActor, ResourceClient};

pub fn new(capacity: usize) -> (ResourceActor<ProductImage>, ResourceClient<ProductImage>) {
    ResourceActor::new(capacity)
}
