use super::{related, Resource};
use crate::lifecycle::Repositories;
use crate::model::{ProductId, Review, ReviewId, UserId};
use crate::state::AppState;
use async_trait::async_trait;
use resource_store::ResourceClient;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReviewAuthor {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResource {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user: Option<ReviewAuthor>,
    pub user_comment: String,
    pub admin_comment: Option<String>,
    pub rating: u8,
}

impl ReviewResource {
    pub async fn render(review: &Review, repos: &Repositories) -> Self {
        let user = related(&repos.users, review.user_id).await.map(|u| ReviewAuthor {
            id: u.id,
            name: u.name,
        });
        Self {
            id: review.id,
            product_id: review.product_id,
            user,
            user_comment: review.user_comment.clone(),
            admin_comment: review.admin_comment.clone(),
            rating: review.rating,
        }
    }
}

#[async_trait]
impl Resource for Review {
    const LABEL: &'static str = "Review";
    const SCOPE: &'static str = "reviews";
    const PUBLIC_READ: bool = true;
    type IndexView = ReviewResource;
    type ShowView = ReviewResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.reviews
    }

    async fn index_view(&self, state: &AppState) -> ReviewResource {
        ReviewResource::render(self, &state.repos).await
    }

    async fn show_view(&self, state: &AppState) -> ReviewResource {
        ReviewResource::render(self, &state.repos).await
    }
}
