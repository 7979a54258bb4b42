//! Address repository. Started with a [`UserClient`](crate::clients::UserClient) so
//! every address is checked to belong to an existing user.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Address;
use resource_store::{ResourceActor, ResourceClient};

pub fn new(capacity: usize) -> (ResourceActor<Address>, ResourceClient<Address>) {
    ResourceActor::new(capacity)
}
