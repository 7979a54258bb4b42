//! Product image uploads.
//!
//! Differs from plain CRUD in three ways: the payload is a file, a product holds at
//! most [`MAX_IMAGES_PER_PRODUCT`] images, and every record change is mirrored in the
//! image store. The limit is enforced by the image repository when the record is
//! inserted, so concurrent uploads cannot exceed it.

use super::crud::{not_found, UNEXPECTED};
use crate::model::{
    Product, ProductId, ProductImage, ProductImageCreate, ProductImageId, ProductImageUpdate,
    MAX_IMAGES_PER_PRODUCT,
};
use crate::resource::ProductImageResource;
use crate::response::{ApiError, ApiResult, Reply};
use crate::state::AppState;
use axum::http::StatusCode;
use resource_store::Filter;
use tracing::{error, info, instrument, warn};

/// A file received in the `image` part of a multipart body.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

const NO_FILE: &str = "No image file provided.";
const LIMIT_REACHED: &str = "Images list reached its limit.";

fn image_not_found() -> ApiError {
    ApiError::not_found("Product image not found.")
}

#[derive(Clone)]
pub struct ProductImageService {
    state: AppState,
}

impl ProductImageService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        match self.state.repos.products.get(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(not_found::<Product>()),
            Err(e) => {
                error!(product_id = %id, error = %e, "Product lookup failed");
                Err(ApiError::internal(UNEXPECTED))
            }
        }
    }

    async fn image(&self, id: ProductImageId) -> Result<ProductImage, ApiError> {
        match self.state.repos.product_images.get(id).await {
            Ok(Some(image)) => Ok(image),
            Ok(None) => Err(image_not_found()),
            Err(e) => {
                error!(image_id = %id, error = %e, "Image lookup failed");
                Err(ApiError::internal(UNEXPECTED))
            }
        }
    }

    fn render(&self, image: &ProductImage) -> ProductImageResource {
        ProductImageResource::render(image, &self.state.storage)
    }

    /// Removes a file that no record points to any more. Failures only leave an orphan.
    async fn discard(&self, path: &str) {
        if let Err(e) = self.state.storage.remove(path).await {
            warn!(error = %e, "Could not remove stored image");
        }
    }

    #[instrument(skip(self))]
    pub async fn list_for_product(&self, product_id: ProductId) -> ApiResult {
        self.product(product_id).await?;
        let images = self
            .state
            .repos
            .product_images
            .find(Filter::new(move |i: &ProductImage| i.product_id == product_id))
            .await
            .map_err(|e| {
                error!(error = %e, "Listing images failed");
                ApiError::internal(UNEXPECTED)
            })?;
        let views: Vec<_> = images.iter().map(|i| self.render(i)).collect();
        Ok(Reply::ok(views))
    }

    /// Attaches a new image to a product.
    #[instrument(skip(self, upload), fields(has_file = upload.is_some()))]
    pub async fn store(&self, product_id: ProductId, upload: Option<ImageUpload>) -> ApiResult {
        let Some(upload) = upload else {
            return Err(ApiError::bad_request(NO_FILE));
        };
        self.product(product_id).await?;

        let path = self
            .state
            .storage
            .store(&upload.file_name, &upload.bytes)
            .await
            .map_err(|e| {
                error!(error = %e, "Writing image failed");
                ApiError::internal("Failed to create Product image.")
            })?;

        let params = ProductImageCreate {
            product_id,
            name: upload.file_name.clone(),
            path: path.clone(),
        };
        let same_product = Filter::new(move |i: &ProductImage| i.product_id == product_id);
        let created = self
            .state
            .repos
            .product_images
            .create_if_below(params, same_product, MAX_IMAGES_PER_PRODUCT)
            .await;
        let id = match created {
            Ok(id) => id,
            Err(e) => {
                self.discard(&path).await;
                if e.is_limit_reached() {
                    return Err(ApiError::unprocessable(LIMIT_REACHED));
                }
                error!(error = %e, "Creating image record failed");
                return Err(ApiError::internal("Failed to create Product image."));
            }
        };
        info!(%id, %path, "Image attached");

        let image = ProductImage {
            id,
            product_id,
            name: upload.file_name,
            path,
        };
        Ok(Reply::created("Product image created successfully.", self.render(&image)))
    }

    /// Replaces the file behind an image. The previous file is deleted afterwards.
    #[instrument(skip(self, upload), fields(has_file = upload.is_some()))]
    pub async fn update(&self, id: ProductImageId, upload: Option<ImageUpload>) -> ApiResult {
        let Some(upload) = upload else {
            return Err(ApiError::bad_request(NO_FILE));
        };
        let previous = self.image(id).await?;

        let path = self
            .state
            .storage
            .store(&upload.file_name, &upload.bytes)
            .await
            .map_err(|e| {
                error!(error = %e, "Writing image failed");
                ApiError::internal("Failed to update Product image.")
            })?;

        let update = ProductImageUpdate {
            name: upload.file_name,
            path: path.clone(),
        };
        match self.state.repos.product_images.update(id, update).await {
            Ok(image) => {
                self.discard(&previous.path).await;
                info!(%id, %path, "Image replaced");
                Ok(Reply::ok_with_message(
                    "Product image updated successfully.",
                    self.render(&image),
                ))
            }
            Err(e) => {
                self.discard(&path).await;
                if e.is_not_found() {
                    return Err(image_not_found());
                }
                error!(error = %e, "Updating image record failed");
                Err(ApiError::internal("Failed to update Product image."))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn destroy(&self, id: ProductImageId) -> ApiResult {
        let image = self.image(id).await?;
        match self.state.repos.product_images.delete(id).await {
            Ok(()) => {
                self.discard(&image.path).await;
                Ok(Reply::message(StatusCode::OK, "Product image deleted successfully."))
            }
            Err(e) if e.is_not_found() => Err(image_not_found()),
            Err(e) => {
                error!(error = %e, "Deleting image record failed");
                Err(ApiError::internal("Failed to delete Product image."))
            }
        }
    }
}
