//! In-Memory Table Store Adapter
//!
//! Keeps the stock table in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::inventory::ColumnResolver;
use crate::domain::table::{CellWrite, StockTable, TableError};
use crate::ports::{BackingStore, StoreError};

/// In-memory storage for the stock table
#[derive(Debug, Clone)]
pub struct InMemoryTableStore {
    table: Arc<RwLock<StockTable>>,
    saves: Arc<AtomicUsize>,
    cell_writes: Arc<AtomicUsize>,
}

impl InMemoryTableStore {
    /// Create a store holding `table`
    pub fn new(table: StockTable) -> Self {
        Self {
            table: Arc::new(RwLock::new(table)),
            saves: Arc::new(AtomicUsize::new(0)),
            cell_writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a store holding a blank sheet with every template column
    pub fn blank(resolver: &ColumnResolver) -> Result<Self, TableError> {
        Ok(Self::new(StockTable::new(resolver.template_columns())?))
    }

    /// Copy of the stored table
    pub async fn snapshot(&self) -> StockTable {
        self.table.read().await.clone()
    }

    /// Number of full saves received
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of individual cells written through `write_cells`
    pub fn cell_write_count(&self) -> usize {
        self.cell_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingStore for InMemoryTableStore {
    async fn load(&self) -> Result<StockTable, StoreError> {
        Ok(self.table.read().await.clone())
    }

    async fn save(&self, table: &StockTable) -> Result<(), StoreError> {
        *self.table.write().await = table.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn write_cells(&self, writes: &[CellWrite]) -> Result<(), StoreError> {
        self.table.write().await.apply_writes(writes);
        self.cell_writes.fetch_add(writes.len(), Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
