//! Stock dashboard HTTP adapter.
//!
//! Provides REST endpoints for sessions, the editable grid, gross totals and
//! trends.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{StockApiError, StockAppState};
pub use routes::stock_router;
