use crate::model::{ProductId, UserId};
use serde::Deserialize;
use validator::Validate;

entity_id!(ReviewId, "review");

/// Lowest and highest accepted star rating.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A customer's rating of a product, optionally answered by an admin.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_comment: String,
    pub admin_comment: Option<String>,
    pub rating: u8,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreate {
    pub product_id: ProductId,
    pub user_id: UserId,
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 2000))]
    pub user_comment: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub admin_comment: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewUpdate {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 2000))]
    pub user_comment: Option<String>,
    #[validate(length(max = 2000))]
    pub admin_comment: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
}

/// Body of `POST /api/products/{id}/reviews`; product and author come from the route
/// and the token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerReview {
    #[validate(custom(function = "crate::validation::not_blank"), length(max = 2000))]
    pub user_comment: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
}
