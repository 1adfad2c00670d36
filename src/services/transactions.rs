use std::sync::Arc;

use tracing::{info, instrument};

use crate::clock::Clock;
use crate::errors::ServiceError;
use crate::models::{RecordId, TransactionDraft, TransactionRecord};
use crate::store::{self, keys, RecordStore};

/// Append-only ledger of sale/addition events, most-recent-first. Entries are
/// never updated or deleted.
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Assigns a time-based id, prepends the entry, and persists the ledger.
    #[instrument(skip(self))]
    pub async fn record(&self, draft: TransactionDraft) -> Result<TransactionRecord, ServiceError> {
        let mut ledger: Vec<TransactionRecord> =
            store::read_document(self.store.as_ref(), keys::TRANSACTIONS).await?;

        let record = TransactionRecord {
            id: RecordId::from(self.clock.now().timestamp_millis()),
            kind: draft.kind,
            product_name: draft.product_name,
            farmer_name: draft.farmer_name,
            quantity: draft.quantity,
            price_per_kg: draft.price_per_kg,
            total_price: draft.total_price,
            date: draft.date,
            note: draft.note,
            buyer: draft.buyer,
        };
        ledger.insert(0, record.clone());
        store::write_document(self.store.as_ref(), keys::TRANSACTIONS, &ledger).await?;

        info!(id = %record.id, kind = record.kind.as_str(), "transaction recorded");
        Ok(record)
    }

    /// The full ledger, newest entry first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<TransactionRecord>, ServiceError> {
        let ledger = store::read_document(self.store.as_ref(), keys::TRANSACTIONS).await?;
        Ok(ledger)
    }

    /// The `n` most recent entries, for the recent-activity display.
    #[instrument(skip(self))]
    pub async fn recent(&self, n: usize) -> Result<Vec<TransactionRecord>, ServiceError> {
        let mut ledger = self.list().await?;
        ledger.truncate(n);
        Ok(ledger)
    }
}
