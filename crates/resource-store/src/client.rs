//! # Generic Client
//!
//! The repository handle services hold. Cheap to clone (it is only a channel sender).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Every method sends one request and awaits the oneshot reply. `ActorClosed` means the
/// actor is gone, `ActorDropped` means it stopped before answering.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    /// Creates a record unless `limit` records already match `filter`.
    ///
    /// The count and the insert happen in one actor turn, so concurrent callers cannot
    /// push the table past the limit. Refusal is [`FrameworkError::LimitReached`].
    pub async fn create_if_below(
        &self,
        params: T::Create,
        filter: Filter<T>,
        limit: usize,
    ) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::CreateIfBelow {
            params,
            filter,
            limit,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// All records, ordered by id.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    /// Records matching `filter`, ordered by id.
    pub async fn find(&self, filter: Filter<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Find { filter, respond_to })
            .await
    }

    /// First record (lowest id) matching `filter`.
    pub async fn find_one(&self, filter: Filter<T>) -> Result<Option<T>, FrameworkError> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    pub async fn count(&self, filter: Filter<T>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
