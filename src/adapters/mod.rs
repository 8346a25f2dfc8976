//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Local table stores (memory, YAML file)
//! - `sheets` - Spreadsheet-backed table store
//! - `registry` - Open session tracking
//! - `http` - REST API (axum)

pub mod http;
pub mod registry;
pub mod sheets;
pub mod storage;

pub use registry::InMemorySessionRegistry;
pub use sheets::{SheetsConfig, SheetsTableStore};
pub use storage::{FileTableStore, InMemoryTableStore};
