//! Session Registry Port - where open stock sessions live between requests.
//!
//! Every session sits behind its own mutex: a session handles one request at
//! a time, and sessions never share a table.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::StockSession;

/// Handle to one open session.
pub type SharedSession = Arc<Mutex<StockSession>>;

/// Port for tracking open sessions
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Register a newly opened session and return its handle
    async fn insert(&self, session: StockSession) -> SharedSession;

    /// Look up an open session
    async fn get(&self, id: &SessionId) -> Option<SharedSession>;

    /// Close a session. Returns `false` if it was not open.
    async fn remove(&self, id: &SessionId) -> bool;

    /// Number of open sessions
    async fn count(&self) -> usize;
}
