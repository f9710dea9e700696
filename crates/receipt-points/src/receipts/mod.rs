//! Receipt intake, validation, scoring, and memoized points lookup.
//!
//! Payloads arrive as untyped JSON and pass through [`validation`] before anything else sees
//! them. Accepted receipts live in a [`ReceiptStore`] for the life of the process, and their
//! points are computed by [`scoring`] on first lookup and cached from then on.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Amount, Item, Receipt, ReceiptId};
pub use router::{receipt_router, ProcessedReceipt, ReceiptPoints};
pub use scoring::{breakdown, score, ScoreBreakdown, ScoreComponent, ScoringRule};
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{InMemoryReceiptStore, ReceiptStore, StoreError, StoredRecord};
pub use validation::{parse_receipt, validate, ValidationError, Violation};
