use crate::model::ProductId;

entity_id!(ProductImageId, "product_image");

/// At most this many images may be attached to one product.
pub const MAX_IMAGES_PER_PRODUCT: usize = 5;

/// An uploaded picture of a product.
///
/// `path` is relative to the storage root (e.g. `products/3f2a...c1.jpg`); `name` is the
/// client's original file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub name: String,
    pub path: String,
}

/// Payload for creating an image record. Built by the image service after the file
/// has been written, never deserialized from a request.
#[derive(Debug, Clone)]
pub struct ProductImageCreate {
    pub product_id: ProductId,
    pub name: String,
    pub path: String,
}

/// Replacement file for an existing image.
#[derive(Debug, Clone)]
pub struct ProductImageUpdate {
    pub name: String,
    pub path: String,
}
