//! Shared fixtures for the service and HTTP tests.

#![allow(dead_code)]

use resource_store::mock::MockClient;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront::lifecycle::Repositories;
use storefront::model::{
    Address, ChildCategory, Order, ParentCategory, Permission, PermissionId, Product, ProductId,
    ProductImage, Review, Role, User,
};
use storefront::payment::{DisabledGateway, PaymentGateway};
use storefront::pricing::PricingRules;
use storefront::state::AppState;
use storefront::storage::ImageStorage;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One mock per repository. Only the mocks a test scripts are worth verifying; views
/// that reach an unscripted mock render the relation as absent.
pub struct MockRepos {
    pub permissions: MockClient<Permission>,
    pub roles: MockClient<Role>,
    pub users: MockClient<User>,
    pub addresses: MockClient<Address>,
    pub parent_categories: MockClient<ParentCategory>,
    pub child_categories: MockClient<ChildCategory>,
    pub products: MockClient<Product>,
    pub product_images: MockClient<ProductImage>,
    pub reviews: MockClient<Review>,
    pub orders: MockClient<Order>,
}

impl MockRepos {
    pub fn new() -> Self {
        Self {
            permissions: MockClient::new(),
            roles: MockClient::new(),
            users: MockClient::new(),
            addresses: MockClient::new(),
            parent_categories: MockClient::new(),
            child_categories: MockClient::new(),
            products: MockClient::new(),
            product_images: MockClient::new(),
            reviews: MockClient::new(),
            orders: MockClient::new(),
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            permissions: self.permissions.client(),
            roles: self.roles.client(),
            users: self.users.client(),
            addresses: self.addresses.client(),
            parent_categories: self.parent_categories.client(),
            child_categories: self.child_categories.client(),
            products: self.products.client(),
            product_images: self.product_images.client(),
            reviews: self.reviews.client(),
            orders: self.orders.client(),
        }
    }

    pub fn state(&self, storage_root: &Path) -> AppState {
        app_state(self.repositories(), storage_root)
    }

    pub fn state_with_gateway(&self, storage_root: &Path, payments: Arc<dyn PaymentGateway>) -> AppState {
        app_state_with_gateway(self.repositories(), storage_root, payments)
    }
}

pub fn app_state(repos: Repositories, storage_root: &Path) -> AppState {
    app_state_with_gateway(repos, storage_root, Arc::new(DisabledGateway))
}

pub fn app_state_with_gateway(
    repos: Repositories,
    storage_root: &Path,
    payments: Arc<dyn PaymentGateway>,
) -> AppState {
    AppState {
        repos,
        storage: ImageStorage::new(storage_root, "/storage").unwrap(),
        payments,
        pricing: PricingRules::default(),
        currency: "usd".to_string(),
    }
}

pub fn permission(id: u32, name: &str) -> Permission {
    Permission {
        id: PermissionId(id),
        name: name.to_string(),
    }
}

pub fn product(id: u32, slug: &str) -> Product {
    Product {
        id: ProductId(id),
        name: format!("Product {id}"),
        slug: slug.to_string(),
        product_code: format!("P-{id}"),
        price: 25.0,
        discount: 0.0,
        description: "A product".to_string(),
        special_offer: false,
        total_quantities: 4,
        child_category_id: storefront::model::ChildCategoryId(1),
    }
}

/// Counts ERROR events emitted while its subscriber is the default.
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Installs a subscriber for the current thread; events stop counting when the
    /// guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
