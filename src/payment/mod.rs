//! Card payments.
//!
//! The server only creates payment intents; the client confirms the card with the
//! returned `client_secret` and then marks the order paid. [`PaymentGateway`] is the
//! seam: [`StripeGateway`] talks to Stripe, [`DisabledGateway`] is used when no secret
//! key is configured.

mod stripe_gateway;

pub use stripe_gateway::StripeGateway;

use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct IntentRequest {
    /// Amount in minor units (cents).
    pub amount_cents: i64,
    /// ISO currency code, lowercase.
    pub currency: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payments are not configured")]
    Disabled,
    #[error("Unsupported currency: {0}")]
    Currency(String),
    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, request: IntentRequest) -> Result<CreatedIntent, PaymentError>;
}

/// Refuses every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_intent(&self, _request: IntentRequest) -> Result<CreatedIntent, PaymentError> {
        Err(PaymentError::Disabled)
    }
}

/// Picks the gateway for the configured secret key.
pub fn gateway_for(secret_key: Option<&str>) -> std::sync::Arc<dyn PaymentGateway> {
    match secret_key {
        Some(key) => std::sync::Arc::new(StripeGateway::new(key)),
        None => {
            tracing::warn!("STRIPE_SECRET_KEY not set, payments disabled");
            std::sync::Arc::new(DisabledGateway)
        }
    }
}
