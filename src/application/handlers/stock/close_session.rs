//! CloseSessionHandler - Command handler for closing a session.
//!
//! Unsaved edits are discarded with the session.

use std::sync::Arc;

use super::{find_session, StockError};
use crate::domain::foundation::SessionId;
use crate::ports::SessionRegistry;

/// Command to close a session.
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub session_id: SessionId,
}

/// Result of closing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseSessionResult {
    /// Pending cells that were never saved.
    pub discarded_changes: usize,
}

/// Handler for closing sessions.
pub struct CloseSessionHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl CloseSessionHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: CloseSessionCommand) -> Result<CloseSessionResult, StockError> {
        let session = find_session(self.registry.as_ref(), &cmd.session_id).await?;
        let discarded_changes = session.lock().await.pending_count();

        if !self.registry.remove(&cmd.session_id).await {
            return Err(StockError::SessionNotFound(cmd.session_id));
        }

        tracing::info!(session_id = %cmd.session_id, discarded_changes, "Closed stock session");
        Ok(CloseSessionResult { discarded_changes })
    }
}
