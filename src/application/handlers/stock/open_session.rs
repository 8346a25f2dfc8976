//! OpenSessionHandler - Command handler for opening a stock session.
//!
//! Loads one snapshot of the table from the backing store and registers a
//! session over it.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::StockError;
use crate::domain::foundation::{PeriodNaming, SessionId};
use crate::domain::session::{SessionSettings, StockSession};
use crate::ports::{BackingStore, SessionRegistry};

/// Result of opening a session.
#[derive(Debug, Clone)]
pub struct OpenSessionResult {
    pub session_id: SessionId,
    pub records: usize,
    pub period_naming: PeriodNaming,
    pub opened_at: DateTime<Utc>,
}

/// Handler for opening sessions.
pub struct OpenSessionHandler {
    store: Arc<dyn BackingStore>,
    registry: Arc<dyn SessionRegistry>,
    settings: SessionSettings,
}

impl OpenSessionHandler {
    pub fn new(
        store: Arc<dyn BackingStore>,
        registry: Arc<dyn SessionRegistry>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            store,
            registry,
            settings,
        }
    }

    pub async fn handle(&self) -> Result<OpenSessionResult, StockError> {
        let table = self.store.load().await.map_err(|e| {
            tracing::warn!(store = %self.store.describe(), error = %e, "Failed to load stock table");
            e
        })?;

        let session = StockSession::open(table, self.settings.clone());
        let result = OpenSessionResult {
            session_id: *session.id(),
            records: session.table().len(),
            period_naming: session.resolver().naming(),
            opened_at: session.opened_at(),
        };
        self.registry.insert(session).await;

        tracing::info!(
            session_id = %result.session_id,
            records = result.records,
            store = %self.store.describe(),
            "Opened stock session"
        );
        Ok(result)
    }
}
