use super::crud::{not_found, UNEXPECTED};
use crate::clients::OrderClient;
use crate::lifecycle::has_permission;
use crate::model::{Ability, Order, OrderCreate, OrderId, PlaceOrder, User};
use crate::order_actor::OrderError;
use crate::resource::{OrderResource, Resource};
use crate::response::{ApiError, ApiResult, Reply};
use crate::state::AppState;
use crate::validation::Validate;
use tracing::{error, info, instrument, warn};

/// Checkout and order fulfilment.
#[derive(Clone)]
pub struct OrderService {
    state: AppState,
    orders: OrderClient,
}

impl OrderService {
    pub fn new(state: AppState) -> Self {
        let orders = state.repos.order_client();
        Self { state, orders }
    }

    async fn render(&self, order: &Order) -> OrderResource {
        OrderResource::render(order, &self.state.repos).await
    }

    async fn load(&self, id: OrderId) -> Result<Order, ApiError> {
        match self.state.repos.orders.get(id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) => Err(not_found::<Order>()),
            Err(e) => {
                error!(order = %id, error = %e, "Order lookup failed");
                Err(ApiError::internal(UNEXPECTED))
            }
        }
    }

    /// Rejections are the customer's to fix and carry their own message.
    fn reject(e: OrderError, failure: &str) -> ApiError {
        if e.is_rejection() {
            warn!(error = %e, "Order rejected");
            ApiError::unprocessable(e.to_string())
        } else {
            error!(error = %e, "Order repository failed");
            ApiError::internal(failure)
        }
    }

    /// Places an order for `user`. Prices come from the catalog, never from the request.
    #[instrument(skip(self, user, request), fields(user = %user.id))]
    pub async fn place(&self, user: &User, request: PlaceOrder) -> ApiResult {
        request.validate()?;
        let create = OrderCreate {
            user_id: user.id,
            address_id: request.address_id,
            lines: request.items,
        };
        let id = self
            .orders
            .place_order(create)
            .await
            .map_err(|e| Self::reject(e, "Failed to create Order."))?;
        info!(order = %id, "Order placed");

        let order = self.load(id).await?;
        Ok(Reply::created(
            "Order created successfully.",
            self.render(&order).await,
        ))
    }

    /// The caller's own orders, oldest first.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn mine(&self, user: &User) -> ApiResult {
        let orders = self.orders.for_user(user.id).await.map_err(|e| {
            error!(error = %e, "Listing orders failed");
            ApiError::internal(UNEXPECTED)
        })?;
        let mut views = Vec::with_capacity(orders.len());
        for order in &orders {
            views.push(self.render(order).await);
        }
        Ok(Reply::ok(views))
    }

    /// Marks an order paid. Allowed for its owner and for order editors.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn mark_paid(&self, user: &User, id: OrderId) -> ApiResult {
        let order = self.load(id).await?;
        if !order.belongs_to(user.id) {
            let allowed = has_permission(&self.state.repos, user, Ability::Edit, Order::SCOPE)
                .await
                .map_err(|e| {
                    error!(error = %e, "Permission check failed");
                    ApiError::internal(UNEXPECTED)
                })?;
            if !allowed {
                return Err(ApiError::forbidden());
            }
        }

        let paid = self
            .orders
            .mark_paid(id)
            .await
            .map_err(|e| Self::reject(e, "Failed to update Order."))?;
        info!(order = %id, "Order paid");
        Ok(Reply::ok_with_message(
            "Order updated successfully.",
            self.render(&paid).await,
        ))
    }

    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: OrderId) -> ApiResult {
        self.load(id).await?;
        let delivered = self
            .orders
            .mark_delivered(id)
            .await
            .map_err(|e| Self::reject(e, "Failed to update Order."))?;
        info!(order = %id, "Order delivered");
        Ok(Reply::ok_with_message(
            "Order updated successfully.",
            self.render(&delivered).await,
        ))
    }
}
