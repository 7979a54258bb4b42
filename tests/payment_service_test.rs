//! Payment intents: what reaches the gateway and how the service answers.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::MockRepos;
use serde_json::json;
use std::sync::{Arc, Mutex};
use storefront::model::{Address, AddressDetails, AddressId, User, UserId};
use storefront::payment::{CreatedIntent, IntentRequest, PaymentError, PaymentGateway};
use storefront::pricing::to_cents;
use storefront::service::{IntentBody, PaymentService};

/// Accepts every intent and keeps the requests it was sent.
#[derive(Default)]
struct RecordingGateway {
    requests: Mutex<Vec<IntentRequest>>,
}

impl RecordingGateway {
    fn requests(&self) -> Vec<IntentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_intent(&self, request: IntentRequest) -> Result<CreatedIntent, PaymentError> {
        self.requests.lock().unwrap().push(request);
        Ok(CreatedIntent {
            id: "pi_123".into(),
            client_secret: "pi_123_secret_abc".into(),
        })
    }
}

fn customer(id: u32) -> User {
    User {
        id: UserId(id),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        api_token: "token".into(),
        role_ids: Vec::new(),
    }
}

fn address(id: u32, owner: u32) -> Address {
    Address {
        id: AddressId(id),
        user_id: UserId(owner),
        details: AddressDetails {
            name: "Alice".into(),
            surname: "Smith".into(),
            country: "NL".into(),
            city: "Utrecht".into(),
            address: "Oudegracht 1".into(),
            postal_code: "3511".into(),
            phone_number: "+31 30 000 0000".into(),
        },
    }
}

#[tokio::test]
async fn test_intent_returns_client_secret() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .addresses
        .expect_get(AddressId(4))
        .return_ok(Some(address(4, 7)));
    let gateway = Arc::new(RecordingGateway::default());
    let state = mocks.state_with_gateway(dir.path(), gateway.clone());

    let reply = PaymentService::new(state)
        .create_intent(
            &customer(7),
            IntentBody {
                amount: 210.35,
                address_id: AddressId(4),
            },
        )
        .await
        .unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({"clientSecret": "pi_123_secret_abc"}));

    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_cents, to_cents(210.35));
    assert_eq!(requests[0].amount_cents, 21035);
    assert_eq!(requests[0].currency, "usd");
    assert_eq!(requests[0].metadata.get("user_id").map(String::as_str), Some("7"));
    assert_eq!(requests[0].metadata.get("address_id").map(String::as_str), Some("4"));
    mocks.addresses.verify();
}

#[tokio::test]
async fn test_non_positive_amount_is_422() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    let gateway = Arc::new(RecordingGateway::default());
    let service = PaymentService::new(mocks.state_with_gateway(dir.path(), gateway.clone()));

    for amount in [0.0, -5.0, 0.004] {
        let err = service
            .create_intent(
                &customer(7),
                IntentBody {
                    amount,
                    address_id: AddressId(4),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY, "amount {amount}");
        assert_eq!(err.message, "The amount must be greater than 0.");
    }

    assert!(gateway.requests().is_empty());
    mocks.addresses.verify();
}

#[tokio::test]
async fn test_foreign_address_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let mocks = MockRepos::new();
    mocks
        .addresses
        .expect_get(AddressId(4))
        .return_ok(Some(address(4, 99)));
    mocks.addresses.expect_get(AddressId(5)).return_ok(None);
    let gateway = Arc::new(RecordingGateway::default());
    let service = PaymentService::new(mocks.state_with_gateway(dir.path(), gateway.clone()));

    for address_id in [AddressId(4), AddressId(5)] {
        let err = service
            .create_intent(
                &customer(7),
                IntentBody {
                    amount: 20.0,
                    address_id,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Address not found.");
    }

    assert!(gateway.requests().is_empty());
    mocks.addresses.verify();
}
