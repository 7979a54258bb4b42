//! Product image uploads: the five-image limit, the missing-file case and the files
//! left in the image store after each outcome.

mod common;

use axum::http::StatusCode;
use common::{product, MockRepos};
use resource_store::{Filter, FrameworkError};
use std::path::Path;
use storefront::lifecycle::StoreSystem;
use storefront::model::{
    ChildCategoryCreate, ParentCategoryCreate, ProductCreate, ProductId, ProductImage,
    ProductImageId,
};
use storefront::pricing::PricingRules;
use storefront::service::{ImageUpload, ProductImageService};

fn upload(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: b"\x89PNG fake image".to_vec(),
    }
}

fn stored_files(root: &Path) -> usize {
    match std::fs::read_dir(root.join("products")) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

#[tokio::test]
async fn test_sixth_image_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1, "mug")));
    mocks
        .product_images
        .expect_create_if_below()
        .return_err(FrameworkError::LimitReached(5));

    let err = ProductImageService::new(mocks.state(dir.path()))
        .store(ProductId(1), Some(upload("sixth.png")))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message, "Images list reached its limit.");
    // the written file is removed again
    mocks.product_images.verify();
    assert_eq!(stored_files(dir.path()), 0);
}

#[tokio::test]
async fn test_missing_file_is_400_before_any_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();

    let err = ProductImageService::new(mocks.state(dir.path()))
        .store(ProductId(1), None)
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "No image file provided.");
    mocks.products.verify();
    mocks.product_images.verify();
}

#[tokio::test]
async fn test_upload_to_unknown_product_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks.products.expect_get(ProductId(8)).return_ok(None);

    let err = ProductImageService::new(mocks.state(dir.path()))
        .store(ProductId(8), Some(upload("a.png")))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Product not found.");
    mocks.product_images.verify();
}

#[tokio::test]
async fn test_store_writes_file_and_record() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1, "mug")));
    mocks
        .product_images
        .expect_create_if_below()
        .return_ok(ProductImageId(5));

    let reply = ProductImageService::new(mocks.state(dir.path()))
        .store(ProductId(1), Some(upload("Side.PNG")))
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.message_text(), Some("Product image created successfully."));
    assert_eq!(reply.body["data"]["id"], 5);
    assert_eq!(reply.body["data"]["name"], "Side.PNG");
    let url = reply.body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("/storage/products/"));
    assert!(url.ends_with(".png"));
    assert_eq!(stored_files(dir.path()), 1);
    mocks.product_images.verify();
}

#[tokio::test]
async fn test_failed_record_removes_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .products
        .expect_get(ProductId(1))
        .return_ok(Some(product(1, "mug")));
    mocks
        .product_images
        .expect_create_if_below()
        .return_err(FrameworkError::ActorClosed);

    let err = ProductImageService::new(mocks.state(dir.path()))
        .store(ProductId(1), Some(upload("a.png")))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to create Product image.");
    assert_eq!(stored_files(dir.path()), 0);
}

#[tokio::test]
async fn test_update_replaces_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("products")).unwrap();
    let old = dir.path().join("products/old.png");
    std::fs::write(&old, b"old").unwrap();

    let previous = ProductImage {
        id: ProductImageId(2),
        product_id: ProductId(1),
        name: "old.png".into(),
        path: "products/old.png".into(),
    };
    let mocks = MockRepos::new();
    mocks
        .product_images
        .expect_get(ProductImageId(2))
        .return_ok(Some(previous.clone()));
    mocks
        .product_images
        .expect_update(ProductImageId(2))
        .return_ok(ProductImage {
            name: "new.png".into(),
            path: "products/new.png".into(),
            ..previous
        });

    let reply = ProductImageService::new(mocks.state(dir.path()))
        .update(ProductImageId(2), Some(upload("new.png")))
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.message_text(), Some("Product image updated successfully."));
    assert!(!old.exists());
    // the freshly written file is the only one left
    assert_eq!(stored_files(dir.path()), 1);
    mocks.product_images.verify();
}

#[tokio::test]
async fn test_destroy_removes_record_and_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("products")).unwrap();
    std::fs::write(dir.path().join("products/gone.png"), b"x").unwrap();

    let mocks = MockRepos::new();
    mocks
        .product_images
        .expect_get(ProductImageId(3))
        .return_ok(Some(ProductImage {
            id: ProductImageId(3),
            product_id: ProductId(1),
            name: "gone.png".into(),
            path: "products/gone.png".into(),
        }));
    mocks
        .product_images
        .expect_delete(ProductImageId(3))
        .return_ok(());

    let reply = ProductImageService::new(mocks.state(dir.path()))
        .destroy(ProductImageId(3))
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(stored_files(dir.path()), 0);
    mocks.product_images.verify();
}

#[tokio::test]
async fn test_concurrent_uploads_stop_at_limit() {
    let dir = tempfile::tempdir().unwrap();
    let system = StoreSystem::start(64, PricingRules::default());
    let state = common::app_state(system.repositories.clone(), dir.path());
    let repos = &state.repos;
    let parent = repos
        .parent_categories
        .create(ParentCategoryCreate {
            name: "Kitchen".into(),
            slug: None,
        })
        .await
        .unwrap();
    let child = repos
        .child_categories
        .create(ChildCategoryCreate {
            parent_category_id: parent,
            name: "Mugs".into(),
            slug: None,
        })
        .await
        .unwrap();
    let product_id = repos
        .products
        .create(ProductCreate {
            name: "Blue Mug".into(),
            slug: None,
            product_code: "MUG-1".into(),
            price: 20.0,
            discount: 0.0,
            description: String::new(),
            special_offer: false,
            total_quantities: 3,
            child_category_id: child,
        })
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for n in 0..10 {
        let service = ProductImageService::new(state.clone());
        tasks.push(tokio::spawn(async move {
            service
                .store(product_id, Some(upload(&format!("view-{n}.png"))))
                .await
        }));
    }
    let mut refused = 0;
    for task in tasks {
        if let Err(err) = task.await.unwrap() {
            assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(err.message, "Images list reached its limit.");
            refused += 1;
        }
    }

    assert_eq!(refused, 5);
    let attached = repos
        .product_images
        .count(Filter::new(move |i: &ProductImage| i.product_id == product_id))
        .await
        .unwrap();
    assert_eq!(attached, 5);
    assert_eq!(stored_files(dir.path()), 5);

    drop(state);
    system.shutdown().await.unwrap();
}
