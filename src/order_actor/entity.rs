//! [`ActorEntity`] implementation for [`Order`].
//!
//! Creation reserves stock line by line. If any line fails, the lines already reserved
//! are released again before the error is returned, so a rejected order leaves the
//! catalog as it found it.

use super::{OrderAction, OrderError};
use crate::clients::{ProductClient, UserClient};
use crate::model::{
    merge_lines, Address, Order, OrderCreate, OrderId, OrderLine, OrderStatus, OrderUpdate,
    ProductId,
};
use crate::pricing::{summarize, PriceLine, PricingRules};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_store::{ActorClient, ActorEntity, ResourceClient};
use tracing::{info, warn};

/// Repositories and pricing rules the order actor is started with.
#[derive(Clone)]
pub struct OrderContext {
    pub users: UserClient,
    pub products: ProductClient,
    pub addresses: ResourceClient<Address>,
    pub pricing: PricingRules,
}

impl Order {
    /// Moves the order forward to `to`, stamping the matching timestamp.
    fn advance(&mut self, to: OrderStatus, at: DateTime<Utc>) -> Result<(), OrderError> {
        if to <= self.status {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        match to {
            // lowest status, already refused above
            OrderStatus::Pending => {}
            OrderStatus::Paid => {
                self.is_paid = true;
                self.paid_at = Some(at);
            }
            OrderStatus::Delivered => {
                if !self.is_paid {
                    return Err(OrderError::NotPaid);
                }
                self.is_delivered = true;
                self.delivered_at = Some(at);
            }
        }
        self.status = to;
        Ok(())
    }

    fn price_lines(&self) -> Vec<PriceLine> {
        self.lines
            .iter()
            .map(|l| PriceLine {
                price: l.unit_price,
                quantity: l.quantity,
                discount: l.discount,
            })
            .collect()
    }
}

/// Reserves stock for one line and snapshots the product's name and price into it.
async fn reserve_line(products: &ProductClient, line: &mut OrderLine) -> Result<(), OrderError> {
    let product = products
        .get(line.product_id)
        .await
        .map_err(|e| OrderError::Repository(e.to_string()))?
        .ok_or(OrderError::UnknownProduct(line.product_id))?;

    products
        .reserve_stock(line.product_id, line.quantity)
        .await
        .map_err(|e| match e {
            ProductError::InsufficientStock {
                product,
                requested,
                available,
            } => OrderError::InsufficientStock {
                product,
                requested,
                available,
            },
            other => OrderError::Repository(other.to_string()),
        })?;

    line.product_name = product.name;
    line.unit_price = product.price;
    line.discount = product.discount;
    Ok(())
}

/// Best-effort return of reserved units. Failures are logged, not propagated.
async fn release_lines(products: &ProductClient, lines: &[(ProductId, u32)]) {
    for (product_id, quantity) in lines {
        if let Err(e) = products.release_stock(*product_id, *quantity).await {
            warn!(%product_id, quantity, error = %e, "Failed to release stock");
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    /// Builds a pending order with unpriced lines. Repeated products are merged.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        let lines = merge_lines(&params.lines)
            .into_iter()
            .map(|l| OrderLine {
                product_id: l.product_id,
                product_name: String::new(),
                quantity: l.quantity,
                unit_price: 0.0,
                discount: 0.0,
            })
            .collect();
        Ok(Self {
            id,
            order_id: Order::new_reference(),
            user_id: params.user_id,
            address_id: params.address_id,
            status: OrderStatus::Pending,
            lines,
            products_price: 0.0,
            shipping_price: 0.0,
            tax_price: 0.0,
            total_price: 0.0,
            is_paid: false,
            is_delivered: false,
            paid_at: None,
            delivered_at: None,
            created_at: Utc::now(),
        })
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        if self.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = self.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.product_id));
        }

        let user = ctx
            .users
            .get(self.user_id)
            .await
            .map_err(|e| OrderError::Repository(e.to_string()))?;
        if user.is_none() {
            return Err(OrderError::UnknownUser(self.user_id));
        }

        let address = ctx
            .addresses
            .get(self.address_id)
            .await
            .map_err(|e| OrderError::Repository(e.to_string()))?;
        if !address.is_some_and(|a| a.belongs_to(self.user_id)) {
            return Err(OrderError::UnknownAddress(self.address_id));
        }

        let mut reserved = Vec::with_capacity(self.lines.len());
        for line in self.lines.iter_mut() {
            if let Err(e) = reserve_line(&ctx.products, line).await {
                release_lines(&ctx.products, &reserved).await;
                return Err(e);
            }
            reserved.push((line.product_id, line.quantity));
        }

        let summary = summarize(&self.price_lines(), &ctx.pricing);
        self.products_price = summary.discounted_price;
        self.shipping_price = summary.shipping_price;
        self.tax_price = summary.tax_price;
        self.total_price = summary.total_price;
        info!(order = %self.order_id, total = self.total_price, "Order priced");
        Ok(())
    }

    /// Admin status change. Setting the current status again is a no-op.
    async fn on_update(&mut self, update: OrderUpdate, _ctx: &OrderContext) -> Result<(), OrderError> {
        match update.status {
            Some(status) if status != self.status => self.advance(status, Utc::now()),
            _ => Ok(()),
        }
    }

    /// An order that was never delivered gives its stock back.
    async fn on_delete(&self, ctx: &OrderContext) -> Result<(), OrderError> {
        if !self.is_delivered {
            let lines: Vec<_> = self.lines.iter().map(|l| (l.product_id, l.quantity)).collect();
            release_lines(&ctx.products, &lines).await;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: OrderAction, _ctx: &OrderContext) -> Result<Order, OrderError> {
        match action {
            OrderAction::MarkPaid { at } => self.advance(OrderStatus::Paid, at)?,
            OrderAction::MarkDelivered { at } => self.advance(OrderStatus::Delivered, at)?,
        }
        Ok(self.clone())
    }
}
