//! AgriVerse Warehouse Core
//!
//! Data-management core for a warehouse portal tracking agricultural produce.
//! Persistence is a set of named JSON documents behind the [`store::RecordStore`]
//! trait; the UI layer is an external collaborator that calls into the services
//! here and renders the view models from [`views`].
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod clock;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod seed;
pub mod services;
pub mod store;
pub mod views;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::events::EventSender;
use crate::services::dashboard::DashboardService;
use crate::services::inventory::InventoryService;
use crate::services::session::SessionService;
use crate::services::transactions::TransactionService;
use crate::store::{file::FileStore, memory::MemoryStore, RecordStore};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Shared application state: the record store, the event channel, and the
/// services wired on top of them.
#[derive(Clone)]
pub struct Portal {
    pub store: Arc<dyn RecordStore>,
    pub config: AppConfig,
    pub event_sender: EventSender,
    pub inventory: InventoryService,
    pub transactions: TransactionService,
    pub dashboard: DashboardService,
    pub session: SessionService,
}

impl Portal {
    /// Wires services over the given store and clock. Spawns the event
    /// processor task, so this must be called from within a tokio runtime.
    pub fn new(config: AppConfig, store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let event_sender = EventSender::new(event_tx);
        tokio::spawn(events::process_events(event_rx));

        let transactions = TransactionService::new(store.clone(), clock.clone());
        let inventory = InventoryService::new(
            store.clone(),
            transactions.clone(),
            event_sender.clone(),
            clock.clone(),
            config.latency.clone(),
        );
        let dashboard = DashboardService::new(store.clone());
        let session = SessionService::new(
            store.clone(),
            event_sender.clone(),
            config.latency.clone(),
        );

        Self {
            store,
            config,
            event_sender,
            inventory,
            transactions,
            dashboard,
            session,
        }
    }

    /// Builds a portal with the store backend selected by the configuration
    /// and the system clock.
    pub fn from_config(config: AppConfig) -> Self {
        let store: Arc<dyn RecordStore> = match config.storage.backend.as_str() {
            config::FILE_BACKEND => Arc::new(FileStore::new(config.storage.data_dir())),
            _ => Arc::new(MemoryStore::new()),
        };
        Self::new(config, store, Arc::new(SystemClock))
    }
}
