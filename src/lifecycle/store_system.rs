use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::model::{
    Address, ChildCategory, Order, ParentCategory, Permission, Product, ProductImage, Review,
    Role, User,
};
use crate::order_actor::OrderContext;
use crate::pricing::PricingRules;
use crate::review_actor::ReviewContext;
use resource_store::ResourceClient;
use tracing::{error, info};

/// Cloneable bundle of every repository handle. This is what services hold.
#[derive(Clone)]
pub struct Repositories {
    pub permissions: ResourceClient<Permission>,
    pub roles: ResourceClient<Role>,
    pub users: ResourceClient<User>,
    pub addresses: ResourceClient<Address>,
    pub parent_categories: ResourceClient<ParentCategory>,
    pub child_categories: ResourceClient<ChildCategory>,
    pub products: ResourceClient<Product>,
    pub product_images: ResourceClient<ProductImage>,
    pub reviews: ResourceClient<Review>,
    pub orders: ResourceClient<Order>,
}

impl Repositories {
    pub fn user_client(&self) -> UserClient {
        UserClient::new(self.users.clone())
    }

    pub fn product_client(&self) -> ProductClient {
        ProductClient::new(self.products.clone())
    }

    pub fn order_client(&self) -> OrderClient {
        OrderClient::new(self.orders.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorFailed(#[from] tokio::task::JoinError),
}

/// Owns the running repository actors.
///
/// # Wiring
///
/// Every actor is created first, then started with the clients it depends on
/// (late binding through `run(context)`). The dependency graph is acyclic:
///
/// | Repository | Context |
/// |------------|---------|
/// | Permission, ParentCategory | none |
/// | Role | permissions |
/// | User | roles |
/// | Address | users |
/// | ChildCategory | parent categories |
/// | Product | child categories |
/// | ProductImage | products |
/// | Review | users, products |
/// | Order | users, products, addresses, pricing rules |
///
/// # Example
///
/// ```ignore
/// let system = StoreSystem::start(32, PricingRules::default());
/// let repos = system.repositories.clone();
/// // ... serve requests ...
/// drop(repos);
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub repositories: Repositories,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns every repository actor. Must be called inside a Tokio runtime.
    pub fn start(capacity: usize, pricing: PricingRules) -> Self {
        // 1. Create actors (no dependencies yet)
        let (permission_actor, permissions) = crate::access_actor::new_permissions(capacity);
        let (role_actor, roles) = crate::access_actor::new_roles(capacity);
        let (user_actor, users) = crate::user_actor::new(capacity);
        let (address_actor, addresses) = crate::address_actor::new(capacity);
        let (parent_actor, parent_categories) = crate::category_actor::new_parents(capacity);
        let (child_actor, child_categories) = crate::category_actor::new_children(capacity);
        let (product_actor, products) = crate::product_actor::new(capacity);
        let (image_actor, product_images) = crate::product_image_actor::new(capacity);
        let (review_actor, reviews) = crate::review_actor::new(capacity);
        let (order_actor, orders) = crate::order_actor::new(capacity);

        // 2. Start them with their dependencies injected
        let handles = vec![
            tokio::spawn(permission_actor.run(())),
            tokio::spawn(role_actor.run(permissions.clone())),
            tokio::spawn(user_actor.run(roles.clone())),
            tokio::spawn(address_actor.run(UserClient::new(users.clone()))),
            tokio::spawn(parent_actor.run(())),
            tokio::spawn(child_actor.run(parent_categories.clone())),
            tokio::spawn(product_actor.run(child_categories.clone())),
            tokio::spawn(image_actor.run(ProductClient::new(products.clone()))),
            tokio::spawn(review_actor.run(ReviewContext {
                users: UserClient::new(users.clone()),
                products: ProductClient::new(products.clone()),
            })),
            tokio::spawn(order_actor.run(OrderContext {
                users: UserClient::new(users.clone()),
                products: ProductClient::new(products.clone()),
                addresses: addresses.clone(),
                pricing,
            })),
        ];
        info!(actors = handles.len(), capacity, "Store system started");

        Self {
            repositories: Repositories {
                permissions,
                roles,
                users,
                addresses,
                parent_categories,
                child_categories,
                products,
                product_images,
                reviews,
                orders,
            },
            handles,
        }
    }

    /// Drops this system's clients and waits for every actor to stop.
    ///
    /// Actors stop once *all* clients of their channel are gone, so clones handed to
    /// the HTTP layer must be dropped first or this waits forever. Clients held in
    /// other actors' contexts are released as those actors stop.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down store system...");
        drop(self.repositories);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Store system shutdown complete.");
        Ok(())
    }
}
