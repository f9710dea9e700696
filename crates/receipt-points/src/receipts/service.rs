use std::sync::Arc;

use serde_json::Value;

use super::domain::ReceiptId;
use super::scoring;
use super::store::{ReceiptStore, StoreError};
use super::validation::{parse_receipt, ValidationError};

/// Service composing the validator, the receipt store, and the scoring rules.
pub struct ReceiptService<S> {
    store: Arc<S>,
}

impl<S> ReceiptService<S>
where
    S: ReceiptStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate a raw payload and keep it, returning the new receipt id.
    pub fn submit(&self, payload: &Value) -> Result<ReceiptId, ReceiptServiceError> {
        let receipt = parse_receipt(payload).inspect_err(|error| {
            tracing::debug!(violations = ?error.violations, "receipt rejected");
        })?;

        let id = self.store.create(receipt);
        tracing::info!(%id, "receipt accepted");
        Ok(id)
    }

    /// Points for a stored receipt; scored on first request and cached after that.
    pub fn points(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        let points = self.store.score_with(id, scoring::score)?;
        Ok(points)
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
