//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the repository actors, plus the startup data every
//! store needs.
//!
//! 1. [`StoreSystem::start`] creates every actor, then runs each with the clients it
//!    depends on. Construction never needs a dependency, so wiring order is free.
//! 2. [`seed_access_control`] creates the permission catalogue and the `admin` role.
//! 3. [`StoreSystem::shutdown`] drops the clients and awaits the actors. An actor ends
//!    when the last sender of its channel is gone, which includes clones held in other
//!    actors' contexts; because the graph is acyclic those are released in turn.
//!
//! [`setup_tracing`] installs the log subscriber, see [`tracing`](self::tracing).

pub mod seed;
pub mod store_system;
pub mod tracing;

pub use seed::*;
pub use store_system::*;
pub use self::tracing::*;
