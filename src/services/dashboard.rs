use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, instrument};

use crate::errors::ServiceError;
use crate::models::{InventoryItem, ItemStatus, TransactionRecord};
use crate::store::{self, keys, RecordStore};

/// Summary statistics derived from the inventory list and the ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub sold_items: usize,
    pub spoiled_items: usize,
    pub total_revenue: Decimal,
}

/// Pure aggregation over already-loaded data; same inputs, same output.
pub fn compute_stats(
    inventory: &[InventoryItem],
    transactions: &[TransactionRecord],
) -> DashboardStats {
    DashboardStats {
        total_items: inventory.len(),
        sold_items: inventory
            .iter()
            .filter(|item| item.status == ItemStatus::Sold)
            .count(),
        spoiled_items: inventory
            .iter()
            .filter(|item| item.status == ItemStatus::Spoiled)
            .count(),
        total_revenue: transactions.iter().map(|t| t.total_price).sum(),
    }
}

/// Runs the load -> aggregate pipeline over the record store.
#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn RecordStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Reads both documents and aggregates them.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<DashboardStats, ServiceError> {
        let inventory: Vec<InventoryItem> =
            store::read_document(self.store.as_ref(), keys::INVENTORY).await?;
        let transactions: Vec<TransactionRecord> =
            store::read_document(self.store.as_ref(), keys::TRANSACTIONS).await?;
        Ok(compute_stats(&inventory, &transactions))
    }

    /// The `n` most recent ledger entries, for the recent-activity panel.
    #[instrument(skip(self))]
    pub async fn recent_activities(&self, n: usize) -> Result<Vec<TransactionRecord>, ServiceError> {
        let mut transactions: Vec<TransactionRecord> =
            store::read_document(self.store.as_ref(), keys::TRANSACTIONS).await?;
        transactions.truncate(n);
        Ok(transactions)
    }

    /// Spawns a polling task that re-runs the pipeline on the given interval
    /// and publishes each result. The task stops when the receiver is
    /// dropped.
    pub fn spawn_refresh(
        &self,
        interval: Duration,
    ) -> (watch::Receiver<DashboardStats>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(DashboardStats::default());
        let service = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match service.load().await {
                    Ok(stats) => {
                        if tx.send(stats).is_err() {
                            break;
                        }
                    }
                    Err(err) => error!(%err, "dashboard refresh failed"),
                }
            }
        });
        (rx, handle)
    }
}
