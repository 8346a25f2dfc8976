//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::stock::{
    // Commands
    ApplyEditsCommand, ApplyEditsHandler, ApplyEditsResult,
    CloseSessionCommand, CloseSessionHandler, CloseSessionResult,
    OpenSessionHandler, OpenSessionResult,
    SaveMode, SaveSessionCommand, SaveSessionHandler, SaveSessionResult,
    SyncSessionCommand, SyncSessionHandler, SyncSessionResult,
    // Queries
    GetGridSliceHandler, GetGridSliceQuery,
    GetGrossSummaryHandler, GetGrossSummaryQuery,
    GetTrendHandler, GetTrendQuery,
    // Errors
    StockError,
};
