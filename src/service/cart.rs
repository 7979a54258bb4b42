use super::crud::UNEXPECTED;
use crate::model::{merge_lines, LineRequest, ProductId};
use crate::pricing::{summarize, CartSummary, PriceLine};
use crate::response::{ApiError, ApiResult, Reply};
use crate::state::AppState;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

/// Body of `POST /api/cart/summary`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CartRequest {
    #[validate(custom(function = "crate::model::order::valid_lines"))]
    pub items: Vec<LineRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub discount: f64,
    pub in_stock: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    #[serde(flatten)]
    pub summary: CartSummary,
}

/// Prices a cart against the current catalog.
#[derive(Clone)]
pub struct CartService {
    state: AppState,
}

impl CartService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    #[instrument(skip(self, cart), fields(lines = cart.items.len()))]
    pub async fn summary(&self, cart: CartRequest) -> ApiResult {
        cart.validate()?;

        let mut items = Vec::new();
        for line in merge_lines(&cart.items) {
            let product = self
                .state
                .repos
                .products
                .get(line.product_id)
                .await
                .map_err(|e| {
                    error!(error = %e, "Product lookup failed");
                    ApiError::internal(UNEXPECTED)
                })?
                .ok_or_else(|| {
                    ValidationErrors::single(
                        "items",
                        format!("Product {} does not exist.", line.product_id.0),
                    )
                })?;
            items.push(CartLine {
                product_id: product.id,
                in_stock: product.total_quantities >= line.quantity,
                name: product.name,
                quantity: line.quantity,
                price: product.price,
                discount: product.discount,
            });
        }

        let priced: Vec<PriceLine> = items
            .iter()
            .map(|i| PriceLine {
                price: i.price,
                quantity: i.quantity,
                discount: i.discount,
            })
            .collect();
        let summary = summarize(&priced, &self.state.pricing);
        Ok(Reply::ok(CartView { items, summary }))
    }
}
