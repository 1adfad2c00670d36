use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{info, instrument};
use validator::Validate;

use crate::clock::Clock;
use crate::config::LatencyConfig;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::{
    InventoryItem, ItemDraft, ItemPatch, ItemStatus, RecordId, TransactionDraft, TransactionKind,
};
use crate::seed;
use crate::services::transactions::TransactionService;
use crate::store::{self, keys, RecordStore};

/// Conjunctive listing filters. Empty-string values are treated the same as
/// absent filters.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub status: Option<ItemStatus>,
    pub product_name: Option<String>,
    pub warehouse: Option<String>,
    pub search: Option<String>,
}

impl InventoryFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn status(status: ItemStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Applies the filters in their fixed order: status, product name, warehouse,
/// then case-insensitive substring search over farmer/product/warehouse.
pub fn apply_filters(mut items: Vec<InventoryItem>, filter: &InventoryFilter) -> Vec<InventoryItem> {
    if let Some(status) = filter.status {
        items.retain(|item| item.status == status);
    }
    if let Some(name) = filter.product_name.as_deref().filter(|s| !s.is_empty()) {
        items.retain(|item| item.product_name == name);
    }
    if let Some(warehouse) = filter.warehouse.as_deref().filter(|s| !s.is_empty()) {
        items.retain(|item| item.warehouse == warehouse);
    }
    if let Some(term) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        let term = term.to_lowercase();
        items.retain(|item| {
            item.farmer_name.to_lowercase().contains(&term)
                || item.product_name.to_lowercase().contains(&term)
                || item.warehouse.to_lowercase().contains(&term)
        });
    }
    items
}

/// CRUD and filtering over the inventory list. Creating an item and marking
/// one sold also append to the transaction ledger.
#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn RecordStore>,
    transactions: TransactionService,
    event_sender: EventSender,
    clock: Arc<dyn Clock>,
    latency: LatencyConfig,
}

impl InventoryService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        transactions: TransactionService,
        event_sender: EventSender,
        clock: Arc<dyn Clock>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            store,
            transactions,
            event_sender,
            clock,
            latency,
        }
    }

    /// Creates an item from the draft: time-based id, `available` status,
    /// front insertion, and an `addition` ledger entry with a zero total.
    #[instrument(skip(self))]
    pub async fn add(&self, draft: ItemDraft) -> Result<InventoryItem, ServiceError> {
        draft.validate()?;
        sleep(self.latency.add_delay()).await;

        let mut items: Vec<InventoryItem> =
            store::read_document(self.store.as_ref(), keys::INVENTORY).await?;

        let now = self.clock.now();
        let item = InventoryItem {
            id: RecordId::from(now.timestamp_millis()),
            product_name: draft.product_name,
            farmer_name: draft.farmer_name,
            farmer_phone: draft.farmer_phone,
            quantity: draft.quantity,
            price_per_kg: draft.price_per_kg,
            quality: draft.quality,
            warehouse: draft.warehouse,
            status: ItemStatus::Available,
            created_at: now,
        };
        items.insert(0, item.clone());
        store::write_document(self.store.as_ref(), keys::INVENTORY, &items).await?;

        self.transactions
            .record(TransactionDraft {
                kind: TransactionKind::Addition,
                product_name: item.product_name.clone(),
                farmer_name: item.farmer_name.clone(),
                quantity: item.quantity,
                price_per_kg: item.price_per_kg,
                total_price: Decimal::ZERO,
                date: now,
                note: Some("New stock received".to_string()),
                buyer: None,
            })
            .await?;

        self.event_sender
            .send(Event::ItemAdded {
                id: item.id.clone(),
                product_name: item.product_name.clone(),
                quantity: item.quantity,
            })
            .await
            .map_err(ServiceError::Event)?;

        info!(id = %item.id, product = %item.product_name, "inventory item added");
        Ok(item)
    }

    /// Lists items newest-first. An empty list is self-healed by seeding and
    /// persisting the built-in defaults before filtering.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &InventoryFilter) -> Result<Vec<InventoryItem>, ServiceError> {
        sleep(self.latency.list_delay()).await;

        let mut items: Vec<InventoryItem> =
            store::read_document(self.store.as_ref(), keys::INVENTORY).await?;
        if items.is_empty() {
            items = seed::default_inventory();
            store::write_document(self.store.as_ref(), keys::INVENTORY, &items).await?;
            info!(count = items.len(), "inventory was empty; seeded demo defaults");
            self.event_sender
                .send(Event::DataSeeded {
                    items: items.len(),
                    transactions: 0,
                })
                .await
                .map_err(ServiceError::Event)?;
        }

        let mut items = apply_filters(items, filter);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    /// Merges the patch over the matching item. A patch that sets the status
    /// to `sold` appends a `sale` ledger entry priced from the post-merge
    /// item.
    #[instrument(skip(self))]
    pub async fn update(&self, id: &RecordId, patch: ItemPatch) -> Result<InventoryItem, ServiceError> {
        let mut items: Vec<InventoryItem> =
            store::read_document(self.store.as_ref(), keys::INVENTORY).await?;

        let item = items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| ServiceError::NotFound(format!("inventory item {id} not found")))?;
        patch.apply(item);
        let updated = item.clone();
        store::write_document(self.store.as_ref(), keys::INVENTORY, &items).await?;

        if patch.status == Some(ItemStatus::Sold) {
            let total_price = updated.quantity * updated.price_per_kg;
            self.transactions
                .record(TransactionDraft {
                    kind: TransactionKind::Sale,
                    product_name: updated.product_name.clone(),
                    farmer_name: updated.farmer_name.clone(),
                    quantity: updated.quantity,
                    price_per_kg: updated.price_per_kg,
                    total_price,
                    date: self.clock.now(),
                    note: Some("Stock sold".to_string()),
                    buyer: None,
                })
                .await?;
            self.event_sender
                .send(Event::ItemSold {
                    id: updated.id.clone(),
                    product_name: updated.product_name.clone(),
                    total_price,
                })
                .await
                .map_err(ServiceError::Event)?;
        }

        info!(id = %updated.id, status = updated.status.as_str(), "inventory item updated");
        Ok(updated)
    }

    /// Removes the matching item; `NotFound` when nothing was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &RecordId) -> Result<(), ServiceError> {
        let mut items: Vec<InventoryItem> =
            store::read_document(self.store.as_ref(), keys::INVENTORY).await?;

        let before = items.len();
        items.retain(|item| item.id != *id);
        if items.len() == before {
            return Err(ServiceError::NotFound(format!(
                "inventory item {id} not found"
            )));
        }
        store::write_document(self.store.as_ref(), keys::INVENTORY, &items).await?;

        self.event_sender
            .send(Event::ItemDeleted { id: id.clone() })
            .await
            .map_err(ServiceError::Event)?;

        info!(%id, "inventory item deleted");
        Ok(())
    }
}
