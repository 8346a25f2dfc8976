//! ApplyEditsHandler - Command handler for grid edits.
//!
//! Edits change the session's snapshot only; nothing reaches the store until
//! the session is saved.

use std::sync::Arc;

use super::{find_session, StockError};
use crate::domain::foundation::{Period, SessionId, Site};
use crate::domain::inventory::{CellEdit, GridSlice, SkippedEdit};
use crate::ports::SessionRegistry;

/// Command carrying a batch of edits for one site/period.
#[derive(Debug, Clone)]
pub struct ApplyEditsCommand {
    pub session_id: SessionId,
    pub site: Site,
    pub period: Period,
    pub edits: Vec<CellEdit>,
}

/// Result of applying a batch.
#[derive(Debug, Clone)]
pub struct ApplyEditsResult {
    /// Cells whose text changed, derived cells included.
    pub changed_cells: usize,
    pub derived_rows: Vec<usize>,
    pub skipped: Vec<SkippedEdit>,
    /// Cells awaiting save in the session after this batch.
    pub pending_changes: usize,
    /// The slice as it reads after the batch.
    pub grid: GridSlice,
}

pub struct ApplyEditsHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl ApplyEditsHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: ApplyEditsCommand) -> Result<ApplyEditsResult, StockError> {
        let session = find_session(self.registry.as_ref(), &cmd.session_id).await?;
        let mut session = session.lock().await;

        let outcome = session.apply_edits(cmd.site, cmd.period, &cmd.edits)?;

        tracing::debug!(
            session_id = %cmd.session_id,
            site = %cmd.site,
            period = %cmd.period,
            changed = outcome.changes.len(),
            skipped = outcome.skipped.len(),
            "Applied grid edits"
        );

        Ok(ApplyEditsResult {
            changed_cells: outcome.changes.len(),
            derived_rows: outcome.derived_rows,
            skipped: outcome.skipped,
            pending_changes: session.pending_count(),
            grid: session.grid(cmd.site, cmd.period),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::InMemorySessionRegistry;
    use crate::application::handlers::stock::test_support::{open_session, sample_table};
    use crate::domain::foundation::Metric;
    use crate::domain::inventory::InventoryError;

    fn command(session_id: SessionId, edits: Vec<CellEdit>) -> ApplyEditsCommand {
        ApplyEditsCommand {
            session_id,
            site: Site::KPark,
            period: Period::January,
            edits,
        }
    }

    #[tokio::test]
    async fn rolls_edit_derives_pallets_and_area() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        let handler = ApplyEditsHandler::new(registry.clone());

        let result = handler
            .handle(command(id, vec![CellEdit::new("M1", Metric::Rolls, "100")]))
            .await
            .unwrap();

        assert_eq!(result.changed_cells, 3);
        assert_eq!(result.derived_rows, vec![0]);
        assert_eq!(result.pending_changes, 3);

        let session = registry.get(&id).await.unwrap();
        let session = session.lock().await;
        let table = session.table();
        assert_eq!(table.value(0, table.column("KPark_Pallets Jan")), "5");
        assert_eq!(table.value(0, table.column("KPark_SquareArea Jan")), "250");
    }

    #[tokio::test]
    async fn returned_grid_reflects_edits() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        let handler = ApplyEditsHandler::new(registry);

        let result = handler
            .handle(command(id, vec![CellEdit::new("M2", Metric::SlitRolls, "6")]))
            .await
            .unwrap();

        let column = result
            .grid
            .columns
            .iter()
            .position(|c| c.name == "KPark_SlitRolls Jan")
            .unwrap();
        assert_eq!(result.grid.rows[1].cells[column], "6");
    }

    #[tokio::test]
    async fn unknown_material_changes_nothing() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        let handler = ApplyEditsHandler::new(registry.clone());

        let result = handler
            .handle(command(
                id,
                vec![
                    CellEdit::new("M1", Metric::Rolls, "100"),
                    CellEdit::new("Nope", Metric::Rolls, "1"),
                ],
            ))
            .await;

        assert!(matches!(
            result,
            Err(StockError::Inventory(InventoryError::MaterialNotFound(ref m))) if m == "Nope"
        ));
        let session = registry.get(&id).await.unwrap();
        let session = session.lock().await;
        assert_eq!(session.table(), &sample_table());
        assert!(!session.has_pending_changes());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = ApplyEditsHandler::new(Arc::new(InMemorySessionRegistry::new()));

        let result = handler.handle(command(SessionId::new(), vec![])).await;

        assert!(matches!(result, Err(StockError::SessionNotFound(_))));
    }
}
