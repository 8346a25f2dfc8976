//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `BackingStore` - Load/save of the shared stock table
//! - `SessionRegistry` - Open sessions, one table snapshot each

mod backing_store;
mod session_registry;

pub use backing_store::{BackingStore, StoreError};
pub use session_registry::{SessionRegistry, SharedSession};
