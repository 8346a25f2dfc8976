//! Data Transfer Objects for the stock dashboard HTTP API.
//!
//! Requests carry site/metric/period as text so that bad names come back as
//! `BAD_REQUEST` errors in the standard error body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{
    ApplyEditsResult, CloseSessionResult, OpenSessionResult, SaveMode, SaveSessionResult,
    SyncSessionResult,
};
use crate::domain::foundation::{PeriodNaming, SessionId};
use crate::domain::inventory::{GridSlice, SkippedEdit};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for the grid endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct GridParams {
    pub site: Option<String>,
    pub period: Option<String>,
}

/// Query parameters for the gross summary endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct GrossParams {
    pub period: Option<String>,
}

/// Query parameters for the trend endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TrendParams {
    pub material: Option<String>,
    pub site: Option<String>,
    pub metric: Option<String>,
}

/// Body of `PATCH /grid`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditsRequest {
    pub site: String,
    pub period: String,
    #[serde(default)]
    pub edits: Vec<EditRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub material: String,
    pub metric: String,
    #[serde(default)]
    pub value: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSessionResponse {
    pub session_id: SessionId,
    pub records: usize,
    pub period_naming: PeriodNaming,
    pub opened_at: DateTime<Utc>,
}

impl From<OpenSessionResult> for OpenSessionResponse {
    fn from(result: OpenSessionResult) -> Self {
        Self {
            session_id: result.session_id,
            records: result.records,
            period_naming: result.period_naming,
            opened_at: result.opened_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseSessionResponse {
    pub discarded_changes: usize,
}

impl From<CloseSessionResult> for CloseSessionResponse {
    fn from(result: CloseSessionResult) -> Self {
        Self {
            discarded_changes: result.discarded_changes,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditsResponse {
    pub changed_cells: usize,
    /// Materials whose pallets and area were recomputed.
    pub derived_materials: Vec<String>,
    pub skipped: Vec<SkippedEdit>,
    pub pending_changes: usize,
    pub grid: GridSlice,
}

impl From<ApplyEditsResult> for ApplyEditsResponse {
    fn from(result: ApplyEditsResult) -> Self {
        let derived_materials = result
            .derived_rows
            .iter()
            .filter_map(|&row| result.grid.rows.get(row))
            .map(|row| row.material.clone())
            .collect();
        Self {
            changed_cells: result.changed_cells,
            derived_materials,
            skipped: result.skipped,
            pending_changes: result.pending_changes,
            grid: result.grid,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSessionResponse {
    pub mode: SaveMode,
    pub cells_written: usize,
    pub saved_at: DateTime<Utc>,
}

impl From<SaveSessionResult> for SaveSessionResponse {
    fn from(result: SaveSessionResult) -> Self {
        Self {
            mode: result.mode,
            cells_written: result.cells_written,
            saved_at: result.saved_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSessionResponse {
    pub records: usize,
    pub discarded_changes: usize,
    pub loaded_at: DateTime<Utc>,
}

impl From<SyncSessionResult> for SyncSessionResponse {
    fn from(result: SyncSessionResult) -> Self {
        Self {
            records: result.records,
            discarded_changes: result.discarded_changes,
            loaded_at: result.loaded_at,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            code: "STORE_UNAVAILABLE".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
