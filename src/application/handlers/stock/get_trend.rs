//! GetTrendHandler - Query handler for a material's monthly series.

use std::sync::Arc;

use super::{find_session, StockError};
use crate::domain::foundation::{Metric, SessionId, Site};
use crate::domain::inventory::Trend;
use crate::ports::SessionRegistry;

#[derive(Debug, Clone)]
pub struct GetTrendQuery {
    pub session_id: SessionId,
    pub material: String,
    pub site: Site,
    pub metric: Metric,
}

pub struct GetTrendHandler {
    registry: Arc<dyn SessionRegistry>,
}

impl GetTrendHandler {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, query: GetTrendQuery) -> Result<Trend, StockError> {
        let session = find_session(self.registry.as_ref(), &query.session_id).await?;
        let session = session.lock().await;
        Ok(session.trend(&query.material, query.site, query.metric)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::InMemorySessionRegistry;
    use crate::application::handlers::stock::test_support::open_session;
    use crate::domain::inventory::InventoryError;

    fn query(session_id: SessionId, material: &str) -> GetTrendQuery {
        GetTrendQuery {
            session_id,
            material: material.to_string(),
            site: Site::CliffordRd,
            metric: Metric::Rolls,
        }
    }

    #[tokio::test]
    async fn returns_twelve_points_in_calendar_order() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        let handler = GetTrendHandler::new(registry);

        let trend = handler.handle(query(id, "M1")).await.unwrap();

        assert_eq!(trend.points.len(), 12);
        assert_eq!(trend.values()[0], 1000.0);
        assert!(trend.values()[1..].iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn unknown_material_is_reported() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let id = open_session(registry.as_ref()).await;
        let handler = GetTrendHandler::new(registry);

        let result = handler.handle(query(id, "Ghost")).await;

        assert!(matches!(
            result,
            Err(StockError::Inventory(InventoryError::MaterialNotFound(_)))
        ));
    }
}
