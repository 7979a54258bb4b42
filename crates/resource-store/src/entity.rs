//! # ActorEntity Trait
//!
//! Every record type the storefront persists (users, products, orders, ...) implements
//! `ActorEntity` so one generic `ResourceActor` can act as its repository. The trait fixes
//! the id type, the create/update payloads, custom actions, the injected context and the
//! entity's own error type, and exposes lifecycle hooks run inside the actor task.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`. `on_update` and `handle_action` must always be written,
//! entities without custom actions use [`NoAction`] and match on it exhaustively.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can consult other repositories. The `Context`
/// associated type carries those dependencies; it is handed to `run()`, not `new()`,
/// which lets repositories reference each other without construction-order problems.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Record identifier. Allocated sequentially from `u32`, ordered for stable listings.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a record.
    type Create: Send + Sync + Debug;

    /// Payload for updating a record.
    type Update: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()`. Use `()` when there are none.
    type Context: Send + Sync;

    /// The entity's own error type.
    ///
    /// One enum per entity, not one per operation. Callers recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) with
    /// [`FrameworkError::entity_error`](crate::FrameworkError::entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its allocated id and the create payload.
    /// Runs synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Runs after construction and before the record is stored.
    /// An error here discards the record.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal. An error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

/// Action type for entities that only support CRUD.
///
/// It has no variants, so `match action {}` is a complete `handle_action` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}
