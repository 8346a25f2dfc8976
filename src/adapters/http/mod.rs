//! HTTP adapters - REST API implementations.

pub mod stock;

pub use stock::{stock_router, StockAppState};
