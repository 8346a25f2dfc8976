//! Domain layer containing the stock logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (sites, metrics, periods, IDs, parsing)
//! - `table` - The in-memory snapshot of the stock sheet
//! - `inventory` - Column resolution, derivation, aggregation, trends and the edit grid
//! - `session` - Session-scoped ownership of one table snapshot

pub mod foundation;
pub mod inventory;
pub mod session;
pub mod table;
