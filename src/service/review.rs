use super::crud::{not_found, UNEXPECTED};
use crate::model::{CustomerReview, Product, ProductId, ReviewCreate, User};
use crate::resource::ReviewResource;
use crate::response::{ApiError, ApiResult, Reply};
use crate::review_actor::ReviewError;
use crate::state::AppState;
use crate::validation::Validate;
use tracing::{error, info, instrument};

#[derive(Clone)]
pub struct ReviewService {
    state: AppState,
}

impl ReviewService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Posts `user`'s review of a product.
    #[instrument(skip(self, user, review), fields(user = %user.id))]
    pub async fn post(&self, user: &User, product_id: ProductId, review: CustomerReview) -> ApiResult {
        review.validate()?;
        let params = ReviewCreate {
            product_id,
            user_id: user.id,
            user_comment: review.user_comment,
            admin_comment: None,
            rating: review.rating,
        };

        let reviews = &self.state.repos.reviews;
        let id = reviews.create(params).await.map_err(|e| {
            if let Some(ReviewError::UnknownProduct(_)) = e.entity_error::<ReviewError>() {
                return not_found::<Product>();
            }
            error!(error = %e, "Creating review failed");
            ApiError::internal("Failed to create Review.")
        })?;
        info!(review = %id, product = %product_id, "Review posted");

        match reviews.get(id).await {
            Ok(Some(created)) => Ok(Reply::created(
                "Review created successfully.",
                ReviewResource::render(&created, &self.state.repos).await,
            )),
            _ => Err(ApiError::internal(UNEXPECTED)),
        }
    }
}
