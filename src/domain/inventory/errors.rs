//! Inventory domain errors.

use thiserror::Error;

/// Conditions the stock core reports instead of degrading to zero.
///
/// Missing columns and malformed cells are not errors; only an unknown
/// material key is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Material not found: {0}")]
    MaterialNotFound(String),
}
