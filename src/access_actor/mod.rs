//! Role and permission repositories.
//!
//! Permissions have no dependencies. Roles reference permissions, so the role actor is
//! started with the permission client as its context and refuses unknown ids.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Permission, Role};
use resource_store::{ResourceActor, ResourceClient};

pub fn new_permissions(capacity: usize) -> (ResourceActor<Permission>, ResourceClient<Permission>) {
    ResourceActor::new(capacity)
}

pub fn new_roles(capacity: usize) -> (ResourceActor<Role>, ResourceClient<Role>) {
    ResourceActor::new(capacity)
}
