use super::crud::UNEXPECTED;
use crate::model::{AddressId, User};
use crate::payment::IntentRequest;
use crate::pricing::to_cents;
use crate::response::{ApiError, ApiResult, Reply};
use crate::state::AppState;
use crate::validation::{with_message, Validate};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::{error, info, instrument};
use validator::ValidationError;

/// Body of `POST /api/payment_intents`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IntentBody {
    #[validate(custom(function = "chargeable_amount"))]
    pub amount: f64,
    pub address_id: AddressId,
}

/// Amounts that round to zero cents cannot be charged.
fn chargeable_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || to_cents(amount) <= 0 {
        return Err(with_message("amount", "The amount must be greater than 0."));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PaymentService {
    state: AppState,
}

impl PaymentService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Creates a payment intent and hands its client secret to the browser.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn create_intent(&self, user: &User, body: IntentBody) -> ApiResult {
        body.validate()?;

        let address = self
            .state
            .repos
            .addresses
            .get(body.address_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Address lookup failed");
                ApiError::internal(UNEXPECTED)
            })?;
        if !address.is_some_and(|a| a.belongs_to(user.id)) {
            return Err(ApiError::not_found("Address not found."));
        }

        let metadata = HashMap::from([
            ("user_id".to_string(), user.id.0.to_string()),
            ("address_id".to_string(), body.address_id.0.to_string()),
        ]);
        let request = IntentRequest {
            amount_cents: to_cents(body.amount),
            currency: self.state.currency.clone(),
            metadata,
        };

        let intent = self.state.payments.create_intent(request).await.map_err(|e| {
            error!(error = %e, "Payment intent failed");
            ApiError::internal("Payment could not be initiated.")
        })?;
        info!(intent = %intent.id, "Payment intent created");

        Ok(Reply::raw(
            StatusCode::OK,
            json!({ "clientSecret": intent.client_secret }),
        ))
    }
}
