use super::{ensure_unique, related, related_many, Resource};
use crate::lifecycle::Repositories;
use crate::model::{
    effective_slug, ChildCategory, ChildCategoryId, ParentCategory, ParentCategoryId, Product, ProductId,
    ProductImage, ProductImageId, Review,
};
use crate::response::ApiError;
use crate::state::AppState;
use crate::storage::ImageStorage;
use async_trait::async_trait;
use resource_store::{Filter, ResourceClient};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProductImageResource {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub name: String,
    pub url: String,
}

impl ProductImageResource {
    pub fn render(image: &ProductImage, storage: &ImageStorage) -> Self {
        Self {
            id: image.id,
            product_id: image.product_id,
            name: image.name.clone(),
            url: storage.url(&image.path),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildCategoryResource {
    pub id: ChildCategoryId,
    pub name: String,
    pub slug: String,
    pub parent_category: Option<ParentCategoryResource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentCategoryResource {
    pub id: ParentCategoryId,
    pub name: String,
    pub slug: String,
    /// Only filled in when showing a single category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildSummary>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChildSummary {
    pub id: ChildCategoryId,
    pub name: String,
    pub slug: String,
}

impl From<&ParentCategory> for ParentCategoryResource {
    fn from(parent: &ParentCategory) -> Self {
        Self {
            id: parent.id,
            name: parent.name.clone(),
            slug: parent.slug.clone(),
            children: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductIndexResource {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub product_code: String,
    pub price: f64,
    pub discount: f64,
    pub discounted_price: f64,
    pub special_offer: bool,
    pub total_quantities: u32,
    pub in_stock: bool,
    pub child_category_id: ChildCategoryId,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductShowResource {
    #[serde(flatten)]
    pub summary: ProductIndexResource,
    pub description: String,
    pub images: Vec<ProductImageResource>,
    pub child_category: Option<ChildCategoryResource>,
    pub rating: Option<f64>,
    pub reviews_count: usize,
}

async fn product_images(product: &Product, repos: &Repositories) -> Vec<ProductImage> {
    let product_id = product.id;
    related_many(
        &repos.product_images,
        Filter::new(move |i: &ProductImage| i.product_id == product_id),
    )
    .await
}

fn product_summary(product: &Product, image: Option<String>) -> ProductIndexResource {
    ProductIndexResource {
        id: product.id,
        name: product.name.clone(),
        slug: product.slug.clone(),
        product_code: product.product_code.clone(),
        price: product.price,
        discount: product.discount,
        discounted_price: product.discounted_price(),
        special_offer: product.special_offer,
        total_quantities: product.total_quantities,
        in_stock: product.in_stock(),
        child_category_id: product.child_category_id,
        image,
    }
}

/// Mean rating to one decimal place, `None` without reviews.
fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some((f64::from(sum) / reviews.len() as f64 * 10.0).round() / 10.0)
}

async fn child_category_view(child: &ChildCategory, repos: &Repositories) -> ChildCategoryResource {
    let parent = related(&repos.parent_categories, child.parent_category_id).await;
    ChildCategoryResource {
        id: child.id,
        name: child.name.clone(),
        slug: child.slug.clone(),
        parent_category: parent.as_ref().map(ParentCategoryResource::from),
    }
}

#[async_trait]
impl Resource for Product {
    const LABEL: &'static str = "Product";
    const SCOPE: &'static str = "products";
    const PUBLIC_READ: bool = true;
    type IndexView = ProductIndexResource;
    type ShowView = ProductShowResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.products
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    async fn index_view(&self, state: &AppState) -> ProductIndexResource {
        let first = product_images(self, &state.repos).await.into_iter().next();
        product_summary(self, first.map(|i| state.storage.url(&i.path)))
    }

    async fn show_view(&self, state: &AppState) -> ProductShowResource {
        let images: Vec<ProductImageResource> = product_images(self, &state.repos)
            .await
            .iter()
            .map(|i| ProductImageResource::render(i, &state.storage))
            .collect();

        let child_category = match related(&state.repos.child_categories, self.child_category_id).await {
            Some(child) => Some(child_category_view(&child, &state.repos).await),
            None => None,
        };

        let product_id = self.id;
        let reviews = related_many(
            &state.repos.reviews,
            Filter::new(move |r: &Review| r.product_id == product_id),
        )
        .await;

        ProductShowResource {
            summary: product_summary(self, images.first().map(|i| i.url.clone())),
            description: self.description.clone(),
            images,
            child_category,
            rating: average_rating(&reviews),
            reviews_count: reviews.len(),
        }
    }

    async fn check_create(payload: &Self::Create, state: &AppState) -> Result<(), ApiError> {
        let slug = effective_slug(payload.slug.as_deref(), &payload.name);
        ensure_unique(&state.repos.products, Filter::new(move |p: &Product| p.slug == slug), "slug").await
    }

    async fn check_update(id: &ProductId, payload: &Self::Update, state: &AppState) -> Result<(), ApiError> {
        let Some(slug) = payload.slug.clone() else {
            return Ok(());
        };
        let id = *id;
        ensure_unique(
            &state.repos.products,
            Filter::new(move |p: &Product| p.slug == slug && p.id != id),
            "slug",
        )
        .await
    }
}

#[async_trait]
impl Resource for ParentCategory {
    const LABEL: &'static str = "Category";
    const SCOPE: &'static str = "categories";
    const PUBLIC_READ: bool = true;
    type IndexView = ParentCategoryResource;
    type ShowView = ParentCategoryResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.parent_categories
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    async fn index_view(&self, _state: &AppState) -> ParentCategoryResource {
        ParentCategoryResource::from(self)
    }

    async fn show_view(&self, state: &AppState) -> ParentCategoryResource {
        let parent_id = self.id;
        let children = related_many(
            &state.repos.child_categories,
            Filter::new(move |c: &ChildCategory| c.parent_category_id == parent_id),
        )
        .await
        .into_iter()
        .map(|c| ChildSummary {
            id: c.id,
            name: c.name,
            slug: c.slug,
        })
        .collect();
        ParentCategoryResource {
            children: Some(children),
            ..ParentCategoryResource::from(self)
        }
    }

    async fn check_create(payload: &Self::Create, state: &AppState) -> Result<(), ApiError> {
        let slug = effective_slug(payload.slug.as_deref(), &payload.name);
        ensure_unique(
            &state.repos.parent_categories,
            Filter::new(move |c: &ParentCategory| c.slug == slug),
            "slug",
        )
        .await
    }

    async fn check_update(id: &ParentCategoryId, payload: &Self::Update, state: &AppState) -> Result<(), ApiError> {
        let Some(slug) = payload.slug.clone() else {
            return Ok(());
        };
        let id = *id;
        ensure_unique(
            &state.repos.parent_categories,
            Filter::new(move |c: &ParentCategory| c.slug == slug && c.id != id),
            "slug",
        )
        .await
    }
}

#[async_trait]
impl Resource for ChildCategory {
    const LABEL: &'static str = "Category";
    const SCOPE: &'static str = "categories";
    const PUBLIC_READ: bool = true;
    type IndexView = ChildCategoryResource;
    type ShowView = ChildCategoryResource;

    fn repository(repos: &Repositories) -> &ResourceClient<Self> {
        &repos.child_categories
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    async fn index_view(&self, state: &AppState) -> ChildCategoryResource {
        child_category_view(self, &state.repos).await
    }

    async fn show_view(&self, state: &AppState) -> ChildCategoryResource {
        child_category_view(self, &state.repos).await
    }

    async fn check_create(payload: &Self::Create, state: &AppState) -> Result<(), ApiError> {
        let slug = effective_slug(payload.slug.as_deref(), &payload.name);
        ensure_unique(
            &state.repos.child_categories,
            Filter::new(move |c: &ChildCategory| c.slug == slug),
            "slug",
        )
        .await
    }

    async fn check_update(id: &ChildCategoryId, payload: &Self::Update, state: &AppState) -> Result<(), ApiError> {
        let Some(slug) = payload.slug.clone() else {
            return Ok(());
        };
        let id = *id;
        ensure_unique(
            &state.repos.child_categories,
            Filter::new(move |c: &ChildCategory| c.slug == slug && c.id != id),
            "slug",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewId, UserId};

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::from(1),
            product_id: ProductId::from(1),
            user_id: UserId::from(1),
            user_comment: "ok".into(),
            admin_comment: None,
            rating,
        }
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[review(5), review(4), review(4)]), Some(4.3));
    }
}
