use std::sync::Arc;

use chrono::{TimeZone, Utc};

use agriverse_core::clock::ManualClock;
use agriverse_core::config::AppConfig;
use agriverse_core::store::memory::MemoryStore;
use agriverse_core::store::RecordStore;
use agriverse_core::Portal;

/// Builds a portal on an in-memory store with a manual clock. Latency stays
/// at the real-profile defaults; tests run under a paused tokio clock, so the
/// sleeps fast-forward.
pub fn test_portal() -> (Portal, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ));
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let portal = Portal::new(AppConfig::default(), store, clock.clone());
    (portal, clock)
}
