//! GetGridSliceHandler - Query handler for the editable site/period grid.

use std::sync::Arc;

use super::{find_session, StockError};
use crate::domain::foundation::{Period, SessionId, Site};
use crate::domain::inventory::GridSlice;
use crate::ports::SessionRegistry;

/// Query for one site/period slice of a session's table.
#[derive(Debug, Clone)]
pub struct GetGridSliceQuery {
    pub session_id: SessionId,
    pub site: Site,
    pub period: Period,
}

pub struct GetGridSliceHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl GetGridSliceHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetGridSliceQuery) -> Result<GridSlice, StockError> {
        let session = find_session(self.registry.as_ref(), &query.session_id).await?;
        let session = session.lock().await;
        Ok(session.grid(query.site, query.period))
    }
}
