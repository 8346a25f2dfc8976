//! Route configuration for stock dashboard endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    apply_edits, close_session, get_grid, get_gross_summary, get_trend, open_session,
    save_session, sync_session, StockAppState,
};

/// Creates the stock router with all endpoints.
///
/// Routes:
/// - `POST /api/sessions` - Open a session over a fresh snapshot
/// - `DELETE /api/sessions/:session_id` - Close a session
/// - `GET /api/sessions/:session_id/grid?site=&period=` - Site/period grid
/// - `PATCH /api/sessions/:session_id/grid` - Apply grid edits
/// - `POST /api/sessions/:session_id/save` - Flush edits to the store
/// - `POST /api/sessions/:session_id/sync` - Reload from the store
/// - `GET /api/sessions/:session_id/gross?period=` - Gross stock summary
/// - `GET /api/sessions/:session_id/trend?material=&site=&metric=` - Monthly trend
pub fn stock_router() -> Router<StockAppState> {
    Router::new()
        .route("/api/sessions", post(open_session))
        .route("/api/sessions/:session_id", delete(close_session))
        .route("/api/sessions/:session_id/grid", get(get_grid).patch(apply_edits))
        .route("/api/sessions/:session_id/save", post(save_session))
        .route("/api/sessions/:session_id/sync", post(sync_session))
        .route("/api/sessions/:session_id/gross", get(get_gross_summary))
        .route("/api/sessions/:session_id/trend", get(get_trend))
}
