//! Backing Store Port - Interface for loading and persisting the stock table.
//!
//! The store is the only collaborator that crosses a process boundary. Each
//! call is treated as atomic: the core neither retries nor observes partial
//! writes, and concurrent savers overwrite each other (last writer wins).

use async_trait::async_trait;

use crate::domain::table::{CellWrite, StockTable, TableError};

/// Errors that can occur during backing store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Stock table not found: {0}")]
    NotFound(String),

    #[error("Backing store rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Backing store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize table: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize table: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Stored table is malformed: {0}")]
    InvalidTable(#[from] TableError),
}

/// Port for loading and saving the full stock table
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Load the complete, consistent record set
    ///
    /// # Errors
    /// Returns `StoreError` if the table cannot be fetched or has no
    /// header/material column
    async fn load(&self) -> Result<StockTable, StoreError>;

    /// Overwrite the stored table with `table`
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails
    async fn save(&self, table: &StockTable) -> Result<(), StoreError>;

    /// Write individual cells, addressed by record and column position
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails
    async fn write_cells(&self, writes: &[CellWrite]) -> Result<(), StoreError>;

    /// Human-readable location of the store, for logs
    fn describe(&self) -> String;
}
