//! Domain events published by the services and drained by a logger task.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

use crate::models::RecordId;

/// Events the portal core can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    ItemAdded {
        id: RecordId,
        product_name: String,
        quantity: Decimal,
    },
    ItemSold {
        id: RecordId,
        product_name: String,
        total_price: Decimal,
    },
    ItemDeleted {
        id: RecordId,
    },
    SessionStarted {
        email: String,
    },
    SessionEnded,
    DataSeeded {
        items: usize,
        transactions: usize,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs until every sender is
/// dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        info!(?event, "domain event");
    }
}
