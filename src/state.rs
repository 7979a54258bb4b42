use crate::config::Config;
use crate::lifecycle::Repositories;
use crate::payment::PaymentGateway;
use crate::pricing::PricingRules;
use crate::storage::{ImageStorage, StorageError};
use std::sync::Arc;

/// Everything a request handler needs. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub storage: ImageStorage,
    pub payments: Arc<dyn PaymentGateway>,
    pub pricing: PricingRules,
    pub currency: String,
}

impl AppState {
    /// Fails only when the image store cannot be opened.
    pub fn new(
        repos: Repositories,
        config: &Config,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            repos,
            storage: ImageStorage::new(config.storage_dir.clone(), config.public_prefix.clone())?,
            payments,
            pricing: config.pricing,
            currency: config.currency.clone(),
        })
    }
}
