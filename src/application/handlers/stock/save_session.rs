//! SaveSessionHandler - Command handler for flushing a session to the store.
//!
//! Two modes: rewrite the whole table, or write only the cells changed since
//! the last load or save. Pending changes survive a failed save.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{find_session, StockError};
use crate::domain::foundation::SessionId;
use crate::ports::{BackingStore, SessionRegistry};

/// How a save reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// Overwrite the stored table with the session's snapshot.
    #[default]
    FullTable,
    /// Send only the cells that changed.
    ChangedCells,
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveMode::FullTable => write!(f, "full_table"),
            SaveMode::ChangedCells => write!(f, "changed_cells"),
        }
    }
}

/// Command to save a session.
#[derive(Debug, Clone)]
pub struct SaveSessionCommand {
    pub session_id: SessionId,
}

/// Result of a successful save.
#[derive(Debug, Clone)]
pub struct SaveSessionResult {
    pub mode: SaveMode,
    /// Changed cells flushed by this save.
    pub cells_written: usize,
    pub saved_at: DateTime<Utc>,
}

pub struct SaveSessionHandler {
    store: Arc<dyn BackingStore>,
    registry: Arc<dyn SessionRegistry>,
    mode: SaveMode,
}

impl SaveSessionHandler {
    pub fn new(
        store: Arc<dyn BackingStore>,
        registry: Arc<dyn SessionRegistry>,
        mode: SaveMode,
    ) -> Self {
        Self {
            store,
            registry,
            mode,
        }
    }

    pub async fn handle(&self, cmd: SaveSessionCommand) -> Result<SaveSessionResult, StockError> {
        let session = find_session(self.registry.as_ref(), &cmd.session_id).await?;
        let mut session = session.lock().await;
        let cells_written = session.pending_count();

        let saved = match self.mode {
            SaveMode::FullTable => self.store.save(session.table()).await,
            SaveMode::ChangedCells => self.store.write_cells(&session.pending_writes()).await,
        };
        if let Err(e) = saved {
            tracing::error!(
                session_id = %cmd.session_id,
                store = %self.store.describe(),
                error = %e,
                "Failed to save stock session"
            );
            return Err(e.into());
        }

        session.mark_saved();
        let saved_at = session.last_saved_at().unwrap_or_else(Utc::now);

        tracing::info!(
            session_id = %cmd.session_id,
            mode = %self.mode,
            cells_written,
            "Saved stock session"
        );
        Ok(SaveSessionResult {
            mode: self.mode,
            cells_written,
            saved_at,
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
    use crate::ports::StoreError;

    async fn edit(registry: &InMemorySessionRegistry, id: SessionId) {
        let session = registry.get(&id).await.unwrap();
        session
            .lock()
            .await
            .apply_edits(
                Site::KPark,
                Period::January,
                &[CellEdit::new("M1", Metric::Rolls, "100")],
            )
            .unwrap();
    }

    #[tokio::test]
    async fn full_table_save_overwrites_store() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let store = Arc::new(InMemoryTableStore::new(sample_table()));
        let id = open_session(registry.as_ref()).await;
        edit(&registry, id).await;
        let handler = SaveSessionHandler::new(store.clone(), registry.clone(), SaveMode::FullTable);

        let result = handler.handle(SaveSessionCommand { session_id: id }).await.unwrap();

        assert_eq!(result.mode, SaveMode::FullTable);
        assert_eq!(result.cells_written, 3);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.cell_write_count(), 0);
        let stored = store.snapshot().await;
        assert_eq!(stored.value(0, stored.column("KPark_Rolls Jan")), "100");

        let session = registry.get(&id).await.unwrap();
        let session = session.lock().await;
        assert!(!session.has_pending_changes());
        assert!(session.last_saved_at().is_some());
    }

    #[tokio::test]
    async fn changed_cells_save_sends_only_changes() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let store = Arc::new(InMemoryTableStore::new(sample_table()));
        let id = open_session(registry.as_ref()).await;
        edit(&registry, id).await;
        let handler =
            SaveSessionHandler::new(store.clone(), registry.clone(), SaveMode::ChangedCells);

        let result = handler.handle(SaveSessionCommand { session_id: id }).await.unwrap();

        assert_eq!(result.cells_written, 3);
        assert_eq!(store.cell_write_count(), 3);
        assert_eq!(store.save_count(), 0);
        let stored = store.snapshot().await;
        assert_eq!(stored.value(0, stored.column("KPark_Pallets Jan")), "5");
        assert_eq!(stored.value(0, stored.column("KPark_SquareArea Jan")), "250");
    }

    #[tokio::test]
    async fn failed_save_keeps_pending_changes() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        edit(&registry, id).await;
        let handler =
            SaveSessionHandler::new(Arc::new(FailingStore), registry.clone(), SaveMode::FullTable);

        let result = handler.handle(SaveSessionCommand { session_id: id }).await;

        assert!(matches!(
            result,
            Err(StockError::Store(StoreError::Unavailable(_)))
        ));
        let session = registry.get(&id).await.unwrap();
        let session = session.lock().await;
        assert_eq!(session.pending_count(), 3);
        assert!(session.last_saved_at().is_none());
    }

    #[test]
    fn save_mode_deserializes_from_snake_case() {
        let mode: SaveMode = serde_json::from_str("\"changed_cells\"").unwrap();
        assert_eq!(mode, SaveMode::ChangedCells);
        assert_eq!(SaveMode::default(), SaveMode::FullTable);
        assert_eq!(SaveMode::ChangedCells.to_string(), "changed_cells");
    }
}
