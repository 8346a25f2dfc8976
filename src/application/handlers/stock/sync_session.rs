//! SyncSessionHandler - Command handler for reloading a session's snapshot.
//!
//! Unsaved edits are discarded; the session keeps its id.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{find_session, StockError};
use crate::domain::foundation::SessionId;
use crate::ports::{BackingStore, SessionRegistry};

/// Command to reload a session from the store.
#[derive(Debug, Clone)]
pub struct SyncSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct SyncSessionResult {
    pub records: usize,
    pub discarded_changes: usize,
    pub loaded_at: DateTime<Utc>,
}

pub struct SyncSessionHandler {
    store: Arc<dyn BackingStore>,
    registry: Arc<dyn SessionRegistry>,
}

impl SyncSessionHandler {
    pub fn new(store: Arc<dyn BackingStore>, registry: Arc<dyn SessionRegistry>) -> Self {
        Self { store, registry }
    }

    pub async fn handle(&self, cmd: SyncSessionCommand) -> Result<SyncSessionResult, StockError> {
        let session = find_session(self.registry.as_ref(), &cmd.session_id).await?;
        let mut session = session.lock().await;

        let table = self.store.load().await.map_err(|e| {
            tracing::warn!(session_id = %cmd.session_id, error = %e, "Failed to reload stock table");
            e
        })?;
        let discarded_changes = session.replace_table(table);

        tracing::info!(
            session_id = %cmd.session_id,
            records = session.table().len(),
            discarded_changes,
            "Synced stock session"
        );
        Ok(SyncSessionResult {
            records: session.table().len(),
            discarded_changes,
            loaded_at: session.loaded_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::InMemorySessionRegistry;
    use crate::adapters::storage::InMemoryTableStore;
    use crate::application::handlers::stock::test_support::{
        open_session, sample_table, FailingStore,
    };
    use crate::domain::foundation::{Metric, Period, Site};
    use crate::domain::inventory::CellEdit;
    use crate::domain::table::CellWrite;

    #[tokio::test]
    async fn sync_picks_up_external_changes_and_discards_edits() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let store = Arc::new(InMemoryTableStore::new(sample_table()));
        let id = open_session(registry.as_ref()).await;
        {
            let session = registry.get(&id).await.unwrap();
            session
                .lock()
                .await
                .apply_edits(
                    Site::KPark,
                    Period::January,
                    &[CellEdit::new("M2", Metric::SlitRolls, "3")],
                )
                .unwrap();
        }
        // Another user saved in the meantime.
        store
            .write_cells(&[CellWrite {
                row: 0,
                column: 6,
                value: "42".to_string(),
            }])
            .await
            .unwrap();
        let handler = SyncSessionHandler::new(store, registry.clone());

        let result = handler.handle(SyncSessionCommand { session_id: id }).await.unwrap();

        assert_eq!(result.records, 2);
        assert_eq!(result.discarded_changes, 1);
        let session = registry.get(&id).await.unwrap();
        let session = session.lock().await;
        let table = session.table();
        assert_eq!(table.value(0, table.column("KPark_Rolls Jan")), "42");
        assert_eq!(table.value(1, table.column("KPark_SlitRolls Jan")), "");
        assert!(!session.has_pending_changes());
    }

    #[tokio::test]
    async fn failed_sync_keeps_snapshot() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        let handler = SyncSessionHandler::new(Arc::new(FailingStore), registry.clone());

        let result = handler.handle(SyncSessionCommand { session_id: id }).await;

        assert!(matches!(result, Err(StockError::Store(_))));
        let session = registry.get(&id).await.unwrap();
        assert_eq!(session.lock().await.table(), &sample_table());
    }
}
