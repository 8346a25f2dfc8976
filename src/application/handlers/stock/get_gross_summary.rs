//! GetGrossSummaryHandler - Query handler for cross-site gross totals.

use std::sync::Arc;

use super::{find_session, StockError};
use crate::domain::foundation::{Period, SessionId};
use crate::domain::inventory::GrossSummary;
use crate::ports::SessionRegistry;

#[derive(Debug, Clone)]
pub struct GetGrossSummaryQuery {
    pub session_id: SessionId,
    pub period: Period,
}

/// Handler for the gross stock summary of one period.
pub struct GetGrossSummaryHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl GetGrossSummaryHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetGrossSummaryQuery) -> Result<GrossSummary, StockError> {
        let session = find_session(self.registry.as_ref(), &query.session_id).await?;
        let session = session.lock().await;
        Ok(session.gross_summary(query.period))
    }
}
