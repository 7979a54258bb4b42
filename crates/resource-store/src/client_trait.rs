//! # ActorClient Trait
//!
//! Entity-specific clients (`ProductClient`, `OrderClient`, ...) wrap a
//! `ResourceClient` and translate `FrameworkError` into their own error type.
//! Implementing this trait gives them `get`, `list` and `delete` for free.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for entity-specific clients to inherit the standard reads and delete.
///
/// # Example
///
/// ```rust
/// use resource_store::{ActorClient, ActorEntity, FrameworkError, NoAction, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Coupon { id: u32 }
/// #[derive(Debug)] struct CouponCreate;
/// #[derive(Debug)] struct CouponUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct CouponError(String);
///
/// impl From<String> for CouponError {
///     fn from(s: String) -> Self { CouponError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Coupon {
///     type Id = u32;
///     type Create = CouponCreate;
///     type Update = CouponUpdate;
///     type Action = NoAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CouponError;
///
///     fn from_create_params(id: u32, _: CouponCreate) -> Result<Self, CouponError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: CouponUpdate, _: &()) -> Result<(), CouponError> { Ok(()) }
///     async fn handle_action(&mut self, action: NoAction, _: &()) -> Result<(), CouponError> {
///         match action {}
///     }
/// }
///
/// struct CouponClient { inner: ResourceClient<Coupon> }
///
/// #[async_trait]
/// impl ActorClient<Coupon> for CouponClient {
///     type Error = CouponError;
///
///     fn inner(&self) -> &ResourceClient<Coupon> { &self.inner }
///
///     fn map_error(e: FrameworkError) -> CouponError { CouponError(e.to_string()) }
/// }
///
/// async fn usage(client: CouponClient) {
///     // get(), list() and delete() come from the trait
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The entity-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the entity-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
