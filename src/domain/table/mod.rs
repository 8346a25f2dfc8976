//! Table module - the tabular snapshot every stock operation works on.

pub mod schema;
mod stock_table;

pub use stock_table::{CellWrite, ColumnId, Record, StockTable, TableError};
