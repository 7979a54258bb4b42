//! # Product Client
//!
//! Wraps a `ResourceClient<Product>` and exposes the stock actions as typed calls.

use crate::model::{Product, ProductCreate, ProductId};
use crate::product_actor::{ProductAction, ProductError};
use async_trait::async_trait;
use resource_store::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, ProductError> {
        let slug = slug.to_string();
        self.inner
            .find_one(Filter::new(move |p: &Product| p.slug == slug))
            .await
            .map_err(Self::map_error)
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        self.inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)
    }

    /// Takes `quantity` units out of stock and returns what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!(quantity, "Reserving stock");
        self.inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)
    }

    /// Returns `quantity` units to stock.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!(quantity, "Releasing stock");
        self.inner
            .perform_action(id, ProductAction::ReleaseStock(quantity))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.entity_error::<ProductError>()
            .cloned()
            .unwrap_or_else(|| ProductError::Repository(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);
        responder.send(Ok(42)).unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_sends_quantity() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 5).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::ReserveStock(5));
        responder.send(Ok(15)).unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap(), 15);
    }

    #[tokio::test]
    async fn test_insufficient_stock_is_recovered_from_entity_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        let refusal = ProductError::InsufficientStock {
            product: ProductId(1),
            requested: 100,
            available: 3,
        };
        responder
            .send(Err(FrameworkError::entity(refusal.clone())))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap(), Err(refusal));
    }
}
