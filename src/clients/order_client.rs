use crate::model::{Order, OrderCreate, OrderId, UserId};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use chrono::Utc;
use resource_store::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Orchestration (user and address checks, stock reservation, pricing) happens in
/// the Order actor's `on_create` hook.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order))]
    pub async fn place_order(&self, order: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?order, "place_order called");
        info!(user = %order.user_id, lines = order.lines.len(), "Sending place_order to actor");
        self.inner.create(order).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::MarkPaid { at: Utc::now() })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, OrderAction::MarkDelivered { at: Utc::now() })
            .await
            .map_err(Self::map_error)
    }

    /// A customer's orders, oldest first.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.inner
            .find(Filter::new(move |o: &Order| o.belongs_to(user_id)))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.entity_error::<OrderError>()
            .cloned()
            .unwrap_or_else(|| OrderError::Repository(e.to_string()))
    }
}
