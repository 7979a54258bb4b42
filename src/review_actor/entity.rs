use super::ReviewError;
use crate::clients::{ProductClient, UserClient};
use crate::model::{Review, ReviewCreate, ReviewId, ReviewUpdate, RATING_RANGE};
use async_trait::async_trait;
use resource_store::{ActorClient, ActorEntity, NoAction};

/// Repositories a review is checked against.
#[derive(Clone)]
pub struct ReviewContext {
    pub users: UserClient,
    pub products: ProductClient,
}

fn check_rating(rating: u8) -> Result<(), ReviewError> {
    if RATING_RANGE.contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::InvalidRating(rating))
    }
}

#[async_trait]
impl ActorEntity for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ReviewContext;
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, ReviewError> {
        check_rating(params.rating)?;
        Ok(Self {
            id,
            product_id: params.product_id,
            user_id: params.user_id,
            user_comment: params.user_comment,
            admin_comment: params.admin_comment,
            rating: params.rating,
        })
    }

    async fn on_create(&mut self, ctx: &ReviewContext) -> Result<(), ReviewError> {
        match ctx.products.get(self.product_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(ReviewError::UnknownProduct(self.product_id)),
            Err(e) => return Err(ReviewError::Repository(e.to_string())),
        }
        match ctx.users.get(self.user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ReviewError::UnknownUser(self.user_id)),
            Err(e) => Err(ReviewError::Repository(e.to_string())),
        }
    }

    async fn on_update(&mut self, update: ReviewUpdate, _ctx: &ReviewContext) -> Result<(), ReviewError> {
        if let Some(rating) = update.rating {
            check_rating(rating)?;
            self.rating = rating;
        }
        if let Some(comment) = update.user_comment {
            self.user_comment = comment;
        }
        if let Some(comment) = update.admin_comment {
            self.admin_comment = Some(comment).filter(|c| !c.is_empty());
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &ReviewContext) -> Result<(), ReviewError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, UserId};

    #[test]
    fn test_rating_out_of_range_is_refused() {
        let params = ReviewCreate {
            product_id: ProductId(1),
            user_id: UserId(1),
            user_comment: "meh".into(),
            admin_comment: None,
            rating: 0,
        };
        assert_eq!(
            Review::from_create_params(ReviewId(1), params),
            Err(ReviewError::InvalidRating(0))
        );
    }
}
