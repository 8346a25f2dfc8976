//! Stock command and query handlers.
//!
//! Every handler works on one open session, looked up in the registry and
//! locked for the duration of the call.

mod apply_edits;
mod close_session;
mod errors;
mod get_grid_slice;
mod get_gross_summary;
mod get_trend;
mod open_session;
mod save_session;
mod sync_session;

#[cfg(test)]
mod test_support;

pub use apply_edits::{ApplyEditsCommand, ApplyEditsHandler, ApplyEditsResult};
pub use close_session::{CloseSessionCommand, CloseSessionHandler, CloseSessionResult};
pub use errors::StockError;
pub use get_grid_slice::{GetGridSliceHandler, GetGridSliceQuery};
pub use get_gross_summary::{GetGrossSummaryHandler, GetGrossSummaryQuery};
pub use get_trend::{GetTrendHandler, GetTrendQuery};
pub use open_session::{OpenSessionHandler, OpenSessionResult};
pub use save_session::{SaveMode, SaveSessionCommand, SaveSessionHandler, SaveSessionResult};
pub use sync_session::{SyncSessionCommand, SyncSessionHandler, SyncSessionResult};

use crate::domain::foundation::SessionId;
use crate::ports::{SessionRegistry, SharedSession};

/// Look up an open session or fail with `SessionNotFound`.
async fn find_session(
    registry: &dyn SessionRegistry,
    id: &SessionId,
) -> Result<SharedSession, StockError> {
    registry
        .get(id)
        .await
        .ok_or(StockError::SessionNotFound(*id))
}
