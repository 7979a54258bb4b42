use super::{related, AddressResource, Resource, UserSummary};
use crate::lifecycle::Repositories;
use crate::model::{Order, OrderId, OrderLine, OrderStatus};
use crate::pricing::round_cents;
use crate::state::AppState;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_store::ResourceClient;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OrderLineResource {
    #[serde(flatten)]
    pub line: OrderLine,
    pub line_total: f64,
}

impl From<&OrderLine> for OrderLineResource {
    fn from(line: &OrderLine) -> Self {
        let unit = line.unit_price - line.unit_price * line.discount / 100.0;
        Self {
            line: line.clone(),
            line_total: round_cents(unit * f64::from(line.quantity)),
        }
    }
}

/// An order with its buyer, delivery address and lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResource {
    pub id: OrderId,
    pub order_id: String,
    pub status: OrderStatus,
    pub user: Option<UserSummary>,
    pub address: Option<AddressResource>,
    pub products: Vec<OrderLineResource>,
    pub products_price: f64,
    pub shipping_price: f64,
    pub tax_price: f64,
    pub total_price: f64,
    pub is_paid: bool,
    pub is_delivered: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl OrderResource {
    pub async fn render(order: &Order, repos: &Repositories) -> Self {
        let user = related(&repos.users, order.user_id).await;
        let address = related(&repos.addresses, order.address_id).await;
        Self {
            id: order.id,
            order_id: order.order_id.clone(),
            status: order.status,
            user: user.as_ref().map(UserSummary::from),
            address: address.as_ref().map(AddressResource::from),
            products: order.lines.iter().map(OrderLineResource::from).collect(),
            products_price: order.products_price,
            shipping_price: order.shipping_price,
            tax_price: order.tax_price,
            total_price: order.total_price,
            is_paid: order.is_paid,
            is_delivered: order.is_delivered,
            paid_at: order.paid_at,
            delivered_at: order.delivered_at,
            created_at: order.created_at,
        }
    }
}

#[async_trait]
impl Resource for Order {
    const LABEL: &'static str = "Order";
    const SCOPE: &'static str = "orders";
    type IndexView = OrderResource;
    type ShowView = OrderResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.orders
    }

    async fn index_view(&self, state: &AppState) -> OrderResource {
        OrderResource::render(self, &state.repos).await
    }

    async fn show_view(&self, state: &AppState) -> OrderResource {
        OrderResource::render(self, &state.repos).await
    }
}
