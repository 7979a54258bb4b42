//! # Resource Store
//!
//! Repositories as actors. Each entity type gets one [`ResourceActor`] owning its table
//! and one cloneable [`ResourceClient`] that services use to reach it. Requests for a
//! given entity are processed sequentially, so tables need no locks; different entity
//! types are served in parallel.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the record type, its payloads and lifecycle hooks
//! 2. **Runtime** ([`ResourceActor`]) - the table and the message loop
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed async calls
//!
//! ## Operations
//!
//! | Client call | Behaviour |
//! |-------------|-----------|
//! | `create` | next sequential id, `from_create_params`, `on_create`, insert |
//! | `create_if_below` | `create`, refused with `LimitReached` once the [`Filter`] matches `limit` records |
//! | `get` | `Option<T>` |
//! | `list` | every record, ordered by id |
//! | `find` / `find_one` / `count` | records matching a [`Filter`] |
//! | `update` | `on_update` on a copy, stored only on success |
//! | `delete` | `on_delete` may veto, then remove |
//! | `perform_action` | record-specific [`ActorEntity::Action`] |
//!
//! ## Context Injection
//!
//! Dependencies are handed to `run()` rather than `new()`: all actors are created
//! first, then each is started with the clients it needs. An order repository can
//! therefore consult the user and product repositories inside its `on_create` hook.
//!
//! ```rust
//! use resource_store::{ActorEntity, NoAction, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32 }
//! #[derive(Debug)] struct ShelfCreate;
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("shelf")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = ShelfUpdate; type Action = NoAction;
//!     type ActionResult = (); type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, _: ShelfCreate) -> Result<Self, ShelfError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), ShelfError> { Ok(()) }
//!     async fn handle_action(&mut self, a: NoAction, _: &()) -> Result<(), ShelfError> { match a {} }
//! }
//!
//! #[derive(Clone, Debug)] struct Item { id: u32, shelf: u32 }
//! #[derive(Debug)] struct ItemCreate { shelf: u32 }
//! #[derive(Debug)] struct ItemUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("no shelf {0}")] struct ItemError(u32);
//!
//! #[async_trait]
//! impl ActorEntity for Item {
//!     type Id = u32; type Create = ItemCreate; type Update = ItemUpdate; type Action = NoAction;
//!     type ActionResult = ();
//!     // items check their shelf exists
//!     type Context = ResourceClient<Shelf>;
//!     type Error = ItemError;
//!
//!     fn from_create_params(id: u32, p: ItemCreate) -> Result<Self, ItemError> {
//!         Ok(Self { id, shelf: p.shelf })
//!     }
//!     async fn on_create(&mut self, shelves: &ResourceClient<Shelf>) -> Result<(), ItemError> {
//!         match shelves.get(self.shelf).await {
//!             Ok(Some(_)) => Ok(()),
//!             _ => Err(ItemError(self.shelf)),
//!         }
//!     }
//!     async fn on_update(&mut self, _: ItemUpdate, _: &ResourceClient<Shelf>) -> Result<(), ItemError> { Ok(()) }
//!     async fn handle_action(&mut self, a: NoAction, _: &ResourceClient<Shelf>) -> Result<(), ItemError> {
//!         match a {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (shelf_actor, shelves) = ResourceActor::<Shelf>::new(10);
//!     let (item_actor, items) = ResourceActor::<Item>::new(10);
//!
//!     tokio::spawn(shelf_actor.run(()));
//!     tokio::spawn(item_actor.run(shelves.clone()));
//!
//!     let shelf = shelves.create(ShelfCreate).await.unwrap();
//!     assert!(items.create(ItemCreate { shelf }).await.is_ok());
//!     assert!(items.create(ItemCreate { shelf: 42 }).await.is_err());
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations, which is how
//! repository failures are injected into service tests.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, NoAction};
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
