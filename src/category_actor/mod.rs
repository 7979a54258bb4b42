//! Parent and child category repositories.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{ChildCategory, ParentCategory};
use resource_store::{ResourceActor, ResourceClient};

pub fn new_parents(capacity: usize) -> (ResourceActor<ParentCategory>, ResourceClient<ParentCategory>) {
    ResourceActor::new(capacity)
}

pub fn new_children(capacity: usize) -> (ResourceActor<ChildCategory>, ResourceClient<ChildCategory>) {
    ResourceActor::new(capacity)
}
