//! User repository.
//!
//! Users reference roles, so the actor runs with the role client as its context.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::User;
use resource_store::{ResourceActor, ResourceClient};

/// Creates a new User actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(capacity)
}
