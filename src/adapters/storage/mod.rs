//! Storage Adapters
//!
//! Implementations of the BackingStore port that keep the table locally.
//!
//! ## Available Adapters
//!
//! - **FileTableStore** - Stores the table as a YAML file on disk
//! - **InMemoryTableStore** - Stores the table in memory (testing/development)
//!
//! The spreadsheet-backed store lives in `adapters::sheets`.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileTableStore, InMemoryTableStore};
//!
//! // Local deployment: file-based storage
//! let store = FileTableStore::new("./data/stock.yaml");
//!
//! // Testing: in-memory storage
//! let store = InMemoryTableStore::new(table);
//! ```

mod file_table_store;
mod in_memory_table_store;

pub use file_table_store::FileTableStore;
pub use in_memory_table_store::InMemoryTableStore;
