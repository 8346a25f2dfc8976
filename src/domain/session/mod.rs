//! Session domain module.
//!
//! A stock session holds one user's snapshot of the table from load until
//! save, together with the resolver and derivation settings it was opened
//! with.

mod aggregate;

pub use aggregate::{SessionSettings, StockSession};
