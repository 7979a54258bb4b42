//! [`ActorEntity`] implementation for [`Product`].
//!
//! Includes the stock actions used by order placement.

use super::actions::ProductAction;
use super::ProductError;
use crate::model::{effective_slug, ChildCategory, ChildCategoryId, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use resource_store::{ActorEntity, ResourceClient};

async fn check_category(
    categories: &ResourceClient<ChildCategory>,
    id: ChildCategoryId,
) -> Result<(), ProductError> {
    match categories.get(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ProductError::UnknownCategory(id)),
        Err(e) => Err(ProductError::Repository(e.to_string())),
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = u32;
    type Context = ResourceClient<ChildCategory>;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let slug = effective_slug(params.slug.as_deref(), &params.name);
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            slug,
            product_code: params.product_code,
            price: params.price,
            discount: params.discount,
            description: params.description,
            special_offer: params.special_offer,
            total_quantities: params.total_quantities,
            child_category_id: params.child_category_id,
        })
    }

    async fn on_create(&mut self, categories: &Self::Context) -> Result<(), ProductError> {
        check_category(categories, self.child_category_id).await
    }

    async fn on_update(&mut self, update: ProductUpdate, categories: &Self::Context) -> Result<(), ProductError> {
        if let Some(category) = update.child_category_id {
            check_category(categories, category).await?;
            self.child_category_id = category;
        }
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(code) = update.product_code {
            self.product_code = code;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(special_offer) = update.special_offer {
            self.special_offer = special_offer;
        }
        if let Some(quantities) = update.total_quantities {
            self.total_quantities = quantities;
        }
        Ok(())
    }

    /// # Actions
    /// - `CheckStock`: current stock
    /// - `ReserveStock(n)`: decrements stock if `n` units are available
    /// - `ReleaseStock(n)`: increments stock
    async fn handle_action(&mut self, action: ProductAction, _ctx: &Self::Context) -> Result<u32, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(self.total_quantities),
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => {
                Err(ProductError::InvalidQuantity(0))
            }
            ProductAction::ReserveStock(quantity) => {
                if self.total_quantities < quantity {
                    return Err(ProductError::InsufficientStock {
                        product: self.id,
                        requested: quantity,
                        available: self.total_quantities,
                    });
                }
                self.total_quantities -= quantity;
                Ok(self.total_quantities)
            }
            ProductAction::ReleaseStock(quantity) => {
                self.total_quantities = self.total_quantities.saturating_add(quantity);
                Ok(self.total_quantities)
            }
        }
    }
}
