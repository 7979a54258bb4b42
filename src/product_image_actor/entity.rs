use super::ProductImageError;
use crate::clients::ProductClient;
use crate::model::{ProductImage, ProductImageCreate, ProductImageId, ProductImageUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, ActorEntity, NoAction};

#[async_trait]
impl ActorEntity for ProductImage {
    type Id = ProductImageId;
    type Create = ProductImageCreate;
    type Update = ProductImageUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ProductClient;
    type Error = ProductImageError;

    fn from_create_params(id: ProductImageId, params: ProductImageCreate) -> Result<Self, ProductImageError> {
        Ok(Self {
            id,
            product_id: params.product_id,
            name: params.name,
            path: params.path,
        })
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), ProductImageError> {
        match products.get(self.product_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ProductImageError::UnknownProduct(self.product_id)),
            Err(e) => Err(ProductImageError::Repository(e.to_string())),
        }
    }

    async fn on_update(&mut self, update: ProductImageUpdate, _ctx: &ProductClient) -> Result<(), ProductImageError> {
        self.name = update.name;
        self.path = update.path;
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &ProductClient) -> Result<(), ProductImageError> {
        match action {}
    }
}
