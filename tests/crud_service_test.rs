//! Response contracts of the generic CRUD service, with repository failures injected
//! through `MockClient`.

mod common;

use axum::http::StatusCode;
use common::{permission, product, ErrorCounter, MockRepos};
use resource_store::FrameworkError;
use serde_json::json;
use storefront::model::{
    Permission, PermissionCreate, PermissionId, PermissionUpdate, Product, ProductCreate,
    ProductId, ChildCategoryId,
};
use storefront::service::CrudService;

fn product_payload(name: &str) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        slug: None,
        product_code: "TS-01".to_string(),
        price: 19.99,
        discount: 0.0,
        description: String::new(),
        special_offer: false,
        total_quantities: 3,
        child_category_id: ChildCategoryId(1),
    }
}

#[tokio::test]
async fn test_store_failure_is_500_with_entity_message() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    // slug uniqueness check, then the failing create
    mocks.products.expect_count().return_ok(0);
    mocks.products.expect_create().return_err(FrameworkError::ActorClosed);
    mocks.permissions.expect_count().return_ok(0);
    mocks
        .permissions
        .expect_create()
        .return_err(FrameworkError::ActorDropped);
    let state = mocks.state(dir.path());

    let err = CrudService::<Product>::new(state.clone())
        .store(product_payload("T-Shirt"))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to create Product.");

    let err = CrudService::<Permission>::new(state)
        .store(PermissionCreate {
            name: "admin_view_reports".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to create Permission.");

    mocks.products.verify();
    mocks.permissions.verify();
}

#[tokio::test]
async fn test_store_success_is_201() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks.permissions.expect_count().return_ok(0);
    mocks.permissions.expect_create().return_ok(PermissionId(4));
    mocks
        .permissions
        .expect_get(PermissionId(4))
        .return_ok(Some(permission(4, "admin_view_reports")));

    let reply = CrudService::<Permission>::new(mocks.state(dir.path()))
        .store(PermissionCreate {
            name: "admin_view_reports".into(),
        })
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(
        reply.body,
        json!({
            "message": "Permission created successfully.",
            "data": {"id": 4, "name": "admin_view_reports"}
        })
    );
    mocks.permissions.verify();
}

#[tokio::test]
async fn test_invalid_payload_never_reaches_repository() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();

    let err = CrudService::<Product>::new(mocks.state(dir.path()))
        .store(ProductCreate {
            price: -1.0,
            ..product_payload("")
        })
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = err.errors.unwrap();
    let fields: Vec<&str> = errors.fields().collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"price"));
    mocks.products.verify();
}

#[tokio::test]
async fn test_taken_slug_is_422() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks.products.expect_count().return_ok(1);

    let err = CrudService::<Product>::new(mocks.state(dir.path()))
        .store(product_payload("T-Shirt"))
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message, "The slug has already been taken.");
    mocks.products.verify();
}

#[tokio::test]
async fn test_update_of_missing_record_is_422() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .permissions
        .expect_update(PermissionId(3))
        .return_err(FrameworkError::NotFound("permission_3".into()));

    let err = CrudService::<Permission>::new(mocks.state(dir.path()))
        .update(PermissionId(3), PermissionUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message, "Failed to update Permission.");
    mocks.permissions.verify();
}

#[tokio::test]
async fn test_update_when_repository_is_down_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .permissions
        .expect_update(PermissionId(3))
        .return_err(FrameworkError::ActorClosed);

    let err = CrudService::<Permission>::new(mocks.state(dir.path()))
        .update(PermissionId(3), PermissionUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    mocks.permissions.verify();
}

#[tokio::test]
async fn test_show_missing_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks.products.expect_get(ProductId(9)).return_ok(None);

    let err = CrudService::<Product>::new(mocks.state(dir.path()))
        .show("9")
        .await
        .unwrap_err();

    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Product not found.");
    mocks.products.verify();
}

#[tokio::test]
async fn test_show_failure_is_500_and_logged_once() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .products
        .expect_get(ProductId(2))
        .return_err(FrameworkError::ActorClosed);
    let service = CrudService::<Product>::new(mocks.state(dir.path()));

    let counter = ErrorCounter::default();
    let err = {
        let _guard = counter.install();
        service.show("2").await.unwrap_err()
    };

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "An unexpected error occurred.");
    assert_eq!(counter.count(), 1);
    mocks.products.verify();
}

#[tokio::test]
async fn test_show_by_slug() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .products
        .expect_find()
        .return_ok(vec![product(5, "blue-mug")]);

    let reply = CrudService::<Product>::new(mocks.state(dir.path()))
        .show("blue-mug")
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"]["id"], 5);
    assert_eq!(reply.body["data"]["slug"], "blue-mug");
    // no images, reviews or category scripted: rendered as empty
    assert_eq!(reply.body["data"]["images"], json!([]));
    assert_eq!(reply.body["data"]["child_category"], json!(null));
    assert_eq!(reply.body["data"]["reviews_count"], 0);
    mocks.products.verify();
}

#[tokio::test]
async fn test_empty_list_is_200() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks.permissions.expect_list().return_ok(vec![]);

    let reply = CrudService::<Permission>::new(mocks.state(dir.path()))
        .list()
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"data": []}));
    mocks.permissions.verify();
}

#[tokio::test]
async fn test_destroy_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks.permissions.expect_delete(PermissionId(1)).return_ok(());
    mocks
        .permissions
        .expect_delete(PermissionId(2))
        .return_err(FrameworkError::NotFound("permission_2".into()));
    mocks
        .permissions
        .expect_delete(PermissionId(3))
        .return_err(FrameworkError::ActorClosed);
    let service = CrudService::<Permission>::new(mocks.state(dir.path()));

    let reply = service.destroy(PermissionId(1)).await.unwrap();
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.message_text(), Some("Permission deleted successfully."));

    let err = service.destroy(PermissionId(2)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Permission not found.");

    let err = service.destroy(PermissionId(3)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to delete Permission.");

    mocks.permissions.verify();
}
