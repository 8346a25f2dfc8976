//! HTTP handlers for stock dashboard endpoints.
//!
//! These handlers connect Axum routes to the stock command and query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    ApplyEditsCommand, ApplyEditsHandler, CloseSessionCommand, CloseSessionHandler,
    GetGridSliceHandler, GetGridSliceQuery, GetGrossSummaryHandler, GetGrossSummaryQuery,
    GetTrendHandler, GetTrendQuery, OpenSessionHandler, SaveMode, SaveSessionCommand,
    SaveSessionHandler, StockError, SyncSessionCommand, SyncSessionHandler,
};
use crate::domain::foundation::{Metric, Period, SessionId, Site, ValidationError};
use crate::domain::inventory::{CellEdit, GridSlice, GrossSummary, InventoryError, Trend};
use crate::domain::session::SessionSettings;
use crate::ports::{BackingStore, SessionRegistry, StoreError};

use super::dto::{
    ApplyEditsRequest, ApplyEditsResponse, CloseSessionResponse, ErrorResponse, GridParams,
    GrossParams, OpenSessionResponse, SaveSessionResponse, SyncSessionResponse, TrendParams,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Stock API error that implements IntoResponse.
#[derive(Debug)]
pub enum StockApiError {
    BadRequest(String),
    NotFound { resource: &'static str, id: String },
    BadGateway(String),
}

impl IntoResponse for StockApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            StockApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            StockApiError::NotFound { resource, id } => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(resource, &id))
            }
            StockApiError::BadGateway(msg) => {
                (StatusCode::BAD_GATEWAY, ErrorResponse::bad_gateway(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<StockError> for StockApiError {
    fn from(error: StockError) -> Self {
        match error {
            StockError::SessionNotFound(id) => StockApiError::NotFound {
                resource: "Session",
                id: id.to_string(),
            },
            StockError::Inventory(InventoryError::MaterialNotFound(material)) => {
                StockApiError::NotFound {
                    resource: "Material",
                    id: material,
                }
            }
            StockError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for StockApiError {
    fn from(error: StoreError) -> Self {
        StockApiError::BadGateway(error.to_string())
    }
}

impl From<ValidationError> for StockApiError {
    fn from(error: ValidationError) -> Self {
        StockApiError::BadRequest(error.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing stock dependencies.
#[derive(Clone)]
pub struct StockAppState {
    pub store: Arc<dyn BackingStore>,
    pub registry: Arc<dyn SessionRegistry>,
    pub settings: SessionSettings,
    pub save_mode: SaveMode,
}

impl StockAppState {
    pub fn new(
        store: Arc<dyn BackingStore>,
        registry: Arc<dyn SessionRegistry>,
        settings: SessionSettings,
        save_mode: SaveMode,
    ) -> Self {
        Self {
            store,
            registry,
            settings,
            save_mode,
        }
    }

    pub fn open_session_handler(&self) -> OpenSessionHandler {
        OpenSessionHandler::new(
            self.store.clone(),
            self.registry.clone(),
            self.settings.clone(),
        )
    }

    pub fn close_session_handler(&self) -> CloseSessionHandler {
        CloseSessionHandler::new(self.registry.clone())
    }

    pub fn grid_slice_handler(&self) -> GetGridSliceHandler {
        GetGridSliceHandler::new(self.registry.clone())
    }

    pub fn apply_edits_handler(&self) -> ApplyEditsHandler {
        ApplyEditsHandler::new(self.registry.clone())
    }

    pub fn save_session_handler(&self) -> SaveSessionHandler {
        SaveSessionHandler::new(self.store.clone(), self.registry.clone(), self.save_mode)
    }

    pub fn sync_session_handler(&self) -> SyncSessionHandler {
        SyncSessionHandler::new(self.store.clone(), self.registry.clone())
    }

    pub fn gross_summary_handler(&self) -> GetGrossSummaryHandler {
        GetGrossSummaryHandler::new(self.registry.clone())
    }

    pub fn trend_handler(&self) -> GetTrendHandler {
        GetTrendHandler::new(self.registry.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Parameter Parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, StockApiError> {
    raw.parse()
        .map_err(|_| StockApiError::BadRequest("Invalid session ID format".to_string()))
}

/// Parse a required parameter, reporting its name when absent.
fn required<T>(value: Option<&str>, name: &str) -> Result<T, StockApiError>
where
    T: FromStr<Err = ValidationError>,
{
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(raw.parse()?),
        _ => Err(StockApiError::BadRequest(format!(
            "Missing required parameter: {}",
            name
        ))),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions
///
/// Loads a fresh snapshot of the table and opens a session over it.
pub async fn open_session(
    State(state): State<StockAppState>,
) -> Result<(StatusCode, Json<OpenSessionResponse>), StockApiError> {
    let result = state.open_session_handler().handle().await?;
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// DELETE /api/sessions/:session_id
pub async fn close_session(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CloseSessionResponse>, StockApiError> {
    let cmd = CloseSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let result = state.close_session_handler().handle(cmd).await?;
    Ok(Json(result.into()))
}

/// GET /api/sessions/:session_id/grid?site=&period=
pub async fn get_grid(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
    Query(params): Query<GridParams>,
) -> Result<Json<GridSlice>, StockApiError> {
    let query = GetGridSliceQuery {
        session_id: parse_session_id(&session_id)?,
        site: required(params.site.as_deref(), "site")?,
        period: required(params.period.as_deref(), "period")?,
    };
    let grid = state.grid_slice_handler().handle(query).await?;
    Ok(Json(grid))
}

/// PATCH /api/sessions/:session_id/grid
///
/// Applies a batch of edits to one site/period slice.
pub async fn apply_edits(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ApplyEditsRequest>,
) -> Result<Json<ApplyEditsResponse>, StockApiError> {
    let session_id = parse_session_id(&session_id)?;
    let site: Site = request.site.trim().parse()?;
    let period: Period = request.period.trim().parse()?;
    let edits = request
        .edits
        .into_iter()
        .map(|edit| -> Result<CellEdit, StockApiError> {
            let metric: Metric = edit.metric.trim().parse()?;
            Ok(CellEdit::new(edit.material, metric, edit.value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let cmd = ApplyEditsCommand {
        session_id,
        site,
        period,
        edits,
    };
    let result = state.apply_edits_handler().handle(cmd).await?;
    Ok(Json(result.into()))
}

/// POST /api/sessions/:session_id/save
pub async fn save_session(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SaveSessionResponse>, StockApiError> {
    let cmd = SaveSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let result = state.save_session_handler().handle(cmd).await?;
    Ok(Json(result.into()))
}

/// POST /api/sessions/:session_id/sync
///
/// Reloads the snapshot from the store, discarding unsaved edits.
pub async fn sync_session(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SyncSessionResponse>, StockApiError> {
    let cmd = SyncSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let result = state.sync_session_handler().handle(cmd).await?;
    Ok(Json(result.into()))
}

/// GET /api/sessions/:session_id/gross?period=
pub async fn get_gross_summary(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
    Query(params): Query<GrossParams>,
) -> Result<Json<GrossSummary>, StockApiError> {
    let query = GetGrossSummaryQuery {
        session_id: parse_session_id(&session_id)?,
        period: required(params.period.as_deref(), "period")?,
    };
    let summary = state.gross_summary_handler().handle(query).await?;
    Ok(Json(summary))
}

/// GET /api/sessions/:session_id/trend?material=&site=&metric=
pub async fn get_trend(
    State(state): State<StockAppState>,
    Path(session_id): Path<String>,
    Query(params): Query<TrendParams>,
) -> Result<Json<Trend>, StockApiError> {
    let material = params
        .material
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            StockApiError::BadRequest("Missing required parameter: material".to_string())
        })?;

    let query = GetTrendQuery {
        session_id: parse_session_id(&session_id)?,
        material: material.to_string(),
        site: required(params.site.as_deref(), "site")?,
        metric: required(params.metric.as_deref(), "metric")?,
    };
    let trend = state.trend_handler().handle(query).await?;
    Ok(Json(trend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: StockApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn session_not_found_maps_to_404() {
        let id = SessionId::new();
        let (status, body) = body_json(StockError::SessionNotFound(id).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], format!("Session not found: {}", id));
    }

    #[tokio::test]
    async fn material_not_found_maps_to_404() {
        let error: StockApiError =
            StockError::Inventory(InventoryError::MaterialNotFound("M9".to_string())).into();
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Material not found: M9");
    }

    #[tokio::test]
    async fn store_failure_maps_to_502() {
        let error: StockApiError =
            StockError::Store(StoreError::Unavailable("timeout".to_string())).into();
        let (status, body) = body_json(error).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "STORE_UNAVAILABLE");
    }

    #[test]
    fn required_reports_missing_and_invalid_values() {
        let missing: Result<Site, _> = required(None, "site");
        assert!(matches!(missing, Err(StockApiError::BadRequest(m)) if m.contains("site")));

        let blank: Result<Period, _> = required(Some("  "), "period");
        assert!(matches!(blank, Err(StockApiError::BadRequest(_))));

        let invalid: Result<Metric, _> = required(Some("Boxes"), "metric");
        assert!(matches!(invalid, Err(StockApiError::BadRequest(_))));

        let parsed: Site = required(Some("kpark"), "site").unwrap();
        assert_eq!(parsed, Site::KPark);
    }

    #[test]
    fn parse_session_id_rejects_garbage() {
        assert!(matches!(
            parse_session_id("not-a-uuid"),
            Err(StockApiError::BadRequest(_))
        ));
    }
}
