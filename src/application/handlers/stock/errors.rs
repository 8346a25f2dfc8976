//! Errors surfaced by the stock handlers.

use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::inventory::InventoryError;
use crate::ports::StoreError;

#[derive(Debug, Error)]
pub enum StockError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
