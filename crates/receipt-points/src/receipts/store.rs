use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::domain::{Receipt, ReceiptId};

/// Server-side wrapper around an accepted receipt and its memoized points.
#[derive(Debug)]
pub struct StoredRecord {
    id: ReceiptId,
    receipt: Receipt,
    score: OnceLock<u64>,
}

impl StoredRecord {
    fn new(id: ReceiptId, receipt: Receipt) -> Self {
        Self {
            id,
            receipt,
            score: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &ReceiptId {
        &self.id
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    /// Cached points, if they have been computed.
    pub fn score(&self) -> Option<u64> {
        self.score.get().copied()
    }
}

/// Storage abstraction so the service can be exercised against a fresh store per test.
pub trait ReceiptStore: Send + Sync {
    /// Keeps `receipt` under a new identifier that collides with no live record.
    fn create(&self, receipt: Receipt) -> ReceiptId;

    /// Returns the cached points for `id`, running `compute` first if there are none yet.
    /// `compute` runs at most once per record, even when callers race.
    fn score_with<F>(&self, id: &ReceiptId, compute: F) -> Result<u64, StoreError>
    where
        F: FnOnce(&Receipt) -> u64;

    fn get(&self, id: &ReceiptId) -> Option<Arc<StoredRecord>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("No receipt found for that id")]
    NotFound,
}

/// Process-lifetime store sharded by [`DashMap`]; records are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    records: DashMap<ReceiptId, Arc<StoredRecord>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn create(&self, receipt: Receipt) -> ReceiptId {
        loop {
            let id = ReceiptId::generate();
            match self.records.entry(id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(StoredRecord::new(id.clone(), receipt)));
                    return id;
                }
                Entry::Occupied(_) => {
                    tracing::warn!(%id, "receipt id collision, drawing a new one");
                }
            }
        }
    }

    fn score_with<F>(&self, id: &ReceiptId, compute: F) -> Result<u64, StoreError>
    where
        F: FnOnce(&Receipt) -> u64,
    {
        // Clone the record out so the shard lock is released before scoring.
        let record = self.get(id).ok_or(StoreError::NotFound)?;
        let score = *record.score.get_or_init(|| {
            tracing::debug!(%id, "computing receipt points");
            compute(&record.receipt)
        });
        Ok(score)
    }

    fn get(&self, id: &ReceiptId) -> Option<Arc<StoredRecord>> {
        self.records.get(id).map(|entry| Arc::clone(entry.value()))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
