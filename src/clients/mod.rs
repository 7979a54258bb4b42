//! Type-safe wrappers around [`ResourceClient`](resource_store::ResourceClient).
//!
//! Only the repositories other code talks to in domain terms get a wrapper; the rest
//! are used through the generic client directly.

pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
