use std::sync::Arc;

use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::config::LatencyConfig;
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::SessionUser;
use crate::seed;
use crate::store::{self, keys, RecordStore};

const DEMO_EMAIL: &str = "demo@agriverse.com";
const DEMO_NAME: &str = "Demo Manager";
const DEMO_WAREHOUSE: &str = "Lahore Warehouse";

/// Authentication stub. Any credentials sign in; the session user is a
/// display artifact, and login doubles as the demo-data initializer.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn RecordStore>,
    event_sender: EventSender,
    latency: LatencyConfig,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        event_sender: EventSender,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            store,
            event_sender,
            latency,
        }
    }

    /// Always succeeds. Stores the session, then seeds the inventory and
    /// ledger defaults for whichever documents are absent.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, ServiceError> {
        let _ = password; // accepted, never checked
        sleep(self.latency.login_delay()).await;

        let email = email.trim();
        let user = SessionUser {
            email: if email.is_empty() {
                DEMO_EMAIL.to_string()
            } else {
                email.to_string()
            },
            name: DEMO_NAME.to_string(),
            warehouse: DEMO_WAREHOUSE.to_string(),
        };

        self.store.set(keys::LOGGED_IN, "true").await?;
        store::write_document(self.store.as_ref(), keys::SESSION_USER, &user).await?;
        self.seed_missing_defaults().await?;

        self.event_sender
            .send(Event::SessionStarted {
                email: user.email.clone(),
            })
            .await
            .map_err(ServiceError::Event)?;

        info!(email = %user.email, "session started");
        Ok(user)
    }

    /// Clears the session and both data lists unconditionally. Signing out is
    /// a full demo-data reset, not just a session teardown; callers relying
    /// on surviving data must not route through here.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ServiceError> {
        for key in [
            keys::LOGGED_IN,
            keys::SESSION_USER,
            keys::INVENTORY,
            keys::TRANSACTIONS,
        ] {
            self.store.remove(key).await?;
        }

        self.event_sender
            .send(Event::SessionEnded)
            .await
            .map_err(ServiceError::Event)?;

        info!("session ended; demo data reset");
        Ok(())
    }

    /// The stored session user, if any. Malformed content reads as signed
    /// out.
    pub async fn current_user(&self) -> Result<Option<SessionUser>, ServiceError> {
        let user: Option<SessionUser> =
            store::read_document(self.store.as_ref(), keys::SESSION_USER).await?;
        Ok(user)
    }

    pub async fn is_logged_in(&self) -> Result<bool, ServiceError> {
        Ok(self.store.get(keys::LOGGED_IN).await?.as_deref() == Some("true"))
    }

    async fn seed_missing_defaults(&self) -> Result<(), ServiceError> {
        let mut seeded_items = 0;
        let mut seeded_transactions = 0;

        if self.store.get(keys::INVENTORY).await?.is_none() {
            let items = seed::default_inventory();
            seeded_items = items.len();
            store::write_document(self.store.as_ref(), keys::INVENTORY, &items).await?;
        }
        if self.store.get(keys::TRANSACTIONS).await?.is_none() {
            let ledger = seed::default_transactions();
            seeded_transactions = ledger.len();
            store::write_document(self.store.as_ref(), keys::TRANSACTIONS, &ledger).await?;
        }

        if seeded_items > 0 || seeded_transactions > 0 {
            warn!(
                items = seeded_items,
                transactions = seeded_transactions,
                "demo documents were absent; seeded defaults"
            );
            self.event_sender
                .send(Event::DataSeeded {
                    items: seeded_items,
                    transactions: seeded_transactions,
                })
                .await
                .map_err(ServiceError::Event)?;
        }
        Ok(())
    }
}
