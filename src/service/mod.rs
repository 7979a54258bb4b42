//! # Use-case layer
//!
//! Services validate a payload, call the repositories and turn the outcome into a
//! [`Reply`](crate::response::Reply) or an [`ApiError`](crate::response::ApiError).
//! Repository failures are logged here, once, and never shown to clients verbatim.

pub mod account;
pub mod cart;
pub mod crud;
pub mod order;
pub mod payment;
pub mod product_image;
pub mod review;

pub use account::{AccountService, Registration};
pub use cart::{CartRequest, CartService};
pub use crud::CrudService;
pub use order::OrderService;
pub use payment::{IntentBody, PaymentService};
pub use product_image::{ImageUpload, ProductImageService};
pub use review::ReviewService;
