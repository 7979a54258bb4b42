//! # Repository Errors
//!
//! Errors shared by every repository. Entity-specific failures travel boxed inside
//! [`FrameworkError::EntityError`] and can be recovered with
//! [`FrameworkError::entity_error`].

/// Errors that can occur within the repository layer itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Limit of {0} records reached")]
    LimitReached(usize),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Wraps an entity error.
    pub fn entity(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        FrameworkError::EntityError(Box::new(err))
    }

    /// Returns the entity error if this is an `EntityError` holding an `E`.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            FrameworkError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FrameworkError::NotFound(_))
    }

    /// True when a capped insert was refused.
    pub fn is_limit_reached(&self) -> bool {
        matches!(self, FrameworkError::LimitReached(_))
    }

    /// True when the actor could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            FrameworkError::ActorClosed | FrameworkError::ActorDropped
        )
    }
}
