use super::{CreatedIntent, IntentRequest, PaymentError, PaymentGateway};
use async_trait::async_trait;
use tracing::{error, info};

pub struct StripeGateway {
    client: stripe::Client,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            client: stripe::Client::new(secret_key),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, request: IntentRequest) -> Result<CreatedIntent, PaymentError> {
        let currency: stripe::Currency = request
            .currency
            .parse()
            .map_err(|_| PaymentError::Currency(request.currency.clone()))?;

        let mut params = stripe::CreatePaymentIntent::new(request.amount_cents, currency);
        params.metadata = Some(request.metadata);
        params.automatic_payment_methods = Some(stripe::CreatePaymentIntentAutomaticPaymentMethods {
            enabled: true,
            allow_redirects: None,
        });

        let intent = stripe::PaymentIntent::create(&self.client, params)
            .await
            .map_err(|e| {
                error!("Stripe error: {:?}", e);
                PaymentError::Gateway(e.to_string())
            })?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Gateway("payment intent has no client secret".into()))?;
        info!(intent = %intent.id, amount = request.amount_cents, "Payment intent created");
        Ok(CreatedIntent {
            id: intent.id.to_string(),
            client_secret,
        })
    }
}
