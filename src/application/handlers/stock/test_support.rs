//! Shared fixtures for the stock handler tests.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionSettings, StockSession};
use crate::domain::table::{CellWrite, StockTable};
use crate::ports::{BackingStore, SessionRegistry, StoreError};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Two materials with January columns for KPark and CliffordRd.
pub fn sample_table() -> StockTable {
    StockTable::from_rows(vec![
        row(&[
            "Material",
            "Laminate",
            "Code",
            "MetersPerRoll",
            "RollsPerPallet",
            "AreaPerPallet",
            "KPark_Rolls Jan",
            "KPark_SlitRolls Jan",
            "KPark_Pallets Jan",
            "KPark_SquareArea Jan",
            "CliffordRd_Rolls Jan",
            "CliffordRd_Pallets Jan",
            "SquareArea Jan",
        ]),
        row(&[
            "M1", "Gloss", "C1", "2.5", "20", "0", "10", "", "0.5", "25", "1,000", "", "",
        ]),
        row(&["M2", "Matte", "C2", "", "", "", "", "", "", "", "abc", "", ""]),
    ])
    .expect("sample table has a material column")
}

/// Register a session over `sample_table()` and return its id.
pub async fn open_session(registry: &dyn SessionRegistry) -> SessionId {
    let session = StockSession::open(sample_table(), SessionSettings::default());
    let id = *session.id();
    registry.insert(session).await;
    id
}

/// Store whose every call fails as if the remote were down.
pub struct FailingStore;

#[async_trait]
impl BackingStore for FailingStore {
    async fn load(&self) -> Result<StockTable, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn save(&self, _table: &StockTable) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn write_cells(&self, _writes: &[CellWrite]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}
