//! Spreadsheet-backed table store.
//!
//! Talks to the spreadsheet values API: one worksheet holds the header row
//! followed by one row per material. Cells are read unformatted and numeric
//! cells are written back as numbers, so sheet formulas over them keep working.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::a1;
use super::service_account::{ServiceAccountAuthenticator, ServiceAccountCredentials};
use crate::domain::foundation::parse_numeric;
use crate::domain::table::schema::identity;
use crate::domain::table::{CellWrite, StockTable};
use crate::ports::{BackingStore, StoreError};

/// Default base URL of the spreadsheets API.
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Default worksheet name.
pub const DEFAULT_WORKSHEET: &str = "Sheet1";

/// Writes are stored exactly as sent; no formula or date parsing.
const VALUE_INPUT_OPTION: &str = "RAW";

/// Reads return raw numbers rather than display text such as `1,250`.
const VALUE_RENDER_OPTION: &str = "UNFORMATTED_VALUE";

/// Largest magnitude sent as an integer; f64 is exact below 2^53.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Connection settings for one spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub worksheet: String,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl SheetsConfig {
    pub fn new(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: DEFAULT_WORKSHEET.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_worksheet(mut self, worksheet: impl Into<String>) -> Self {
        self.worksheet = worksheet.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of `{base}/{spreadsheet_id}/{segments...}` with each segment escaped.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| StoreError::Unavailable(format!("invalid API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Unavailable("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, range: &str) -> Result<Url, StoreError> {
        self.endpoint(&["values", range])
    }

    fn batch_update_url(&self) -> Result<Url, StoreError> {
        self.endpoint(&["values:batchUpdate"])
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody {
    range: String,
    major_dimension: &'static str,
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateBody {
    value_input_option: &'static str,
    data: Vec<CellData>,
}

#[derive(Debug, Serialize)]
struct CellData {
    range: String,
    values: [[Value; 1]; 1],
}

/// Render a cell returned by the API as the text the table stores.
fn cell_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Render a cell's text as the value written to the sheet: numbers for
/// numeric text, strings otherwise.
fn sheet_value(text: &str) -> Value {
    match parse_numeric(text) {
        Some(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => Value::from(n as i64),
        Some(n) => Value::from(n),
        None => Value::String(text.to_string()),
    }
}

/// Header plus records, with identity columns always sent as text.
fn sheet_rows(table: &StockTable) -> Vec<Vec<Value>> {
    let text_columns: Vec<bool> = table
        .columns()
        .iter()
        .map(|name| identity::ALL.contains(&name.trim()))
        .collect();

    let mut rows = table.to_rows().into_iter();
    let header = rows
        .next()
        .map(|header| header.into_iter().map(Value::String).collect());
    let records = rows.map(|row| {
        row.into_iter()
            .zip(&text_columns)
            .map(|(cell, &is_text)| {
                if is_text {
                    Value::String(cell)
                } else {
                    sheet_value(&cell)
                }
            })
            .collect()
    });
    header.into_iter().chain(records).collect()
}

/// Partial writes only ever target observation columns.
fn batch_update_body(worksheet: &str, writes: &[CellWrite]) -> BatchUpdateBody {
    BatchUpdateBody {
        value_input_option: VALUE_INPUT_OPTION,
        data: writes
            .iter()
            .map(|write| CellData {
                range: a1::cell_range(worksheet, write),
                values: [[sheet_value(&write.value)]],
            })
            .collect(),
    }
}

/// Map a non-success status onto a store error.
fn status_error(status: StatusCode, body: &str) -> StoreError {
    match status.as_u16() {
        401 | 403 => StoreError::Unauthorized(format!("spreadsheet API returned {}", status)),
        404 => StoreError::NotFound(format!("spreadsheet API returned {}: {}", status, body)),
        _ => StoreError::Unavailable(format!("spreadsheet API returned {}: {}", status, body)),
    }
}

/// Table store backed by a worksheet.
pub struct SheetsTableStore {
    config: SheetsConfig,
    client: Client,
    auth: ServiceAccountAuthenticator,
}

impl SheetsTableStore {
    pub fn new(
        config: SheetsConfig,
        credentials: ServiceAccountCredentials,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("failed to build HTTP client: {}", e)))?;
        let auth = ServiceAccountAuthenticator::new(credentials, client.clone());

        Ok(Self {
            config,
            client,
            auth,
        })
    }

    async fn check(&self, response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.auth.invalidate().await;
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, spreadsheet = %self.config.spreadsheet_id, "Spreadsheet request failed");
        Err(status_error(status, &body))
    }

    fn transport_error(e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Unavailable("spreadsheet request timed out".to_string())
        } else {
            StoreError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl BackingStore for SheetsTableStore {
    async fn load(&self) -> Result<StockTable, StoreError> {
        let token = self.auth.access_token().await?;
        let url = self.config.values_url(&a1::quote_sheet(&self.config.worksheet))?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", VALUE_RENDER_OPTION),
            ])
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(Self::transport_error)?;
        let response = self.check(response).await?;

        let range: ValueRange = response
            .json()
            .await
            .map_err(|e| StoreError::DeserializationFailed(e.to_string()))?;

        let rows = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        let table = StockTable::from_rows(rows)?;

        tracing::debug!(
            spreadsheet = %self.config.spreadsheet_id,
            records = table.len(),
            "Loaded stock table from spreadsheet"
        );
        Ok(table)
    }

    async fn save(&self, table: &StockTable) -> Result<(), StoreError> {
        let token = self.auth.access_token().await?;
        let range = a1::anchor_range(&self.config.worksheet);
        let url = self.config.values_url(&range)?;
        let body = ValueRangeBody {
            range,
            major_dimension: "ROWS",
            values: sheet_rows(table),
        };

        let response = self
            .client
            .put(url)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;
        self.check(response).await?;

        tracing::info!(
            spreadsheet = %self.config.spreadsheet_id,
            rows = body.values.len(),
            "Wrote full table to spreadsheet"
        );
        Ok(())
    }

    async fn write_cells(&self, writes: &[CellWrite]) -> Result<(), StoreError> {
        if writes.is_empty() {
            return Ok(());
        }
        let token = self.auth.access_token().await?;
        let url = self.config.batch_update_url()?;
        let body = batch_update_body(&self.config.worksheet, writes);

        let response = self
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Self::transport_error)?;
        self.check(response).await?;

        tracing::info!(
            spreadsheet = %self.config.spreadsheet_id,
            cells = writes.len(),
            "Wrote changed cells to spreadsheet"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "sheets:{}/{}",
            self.config.spreadsheet_id, self.config.worksheet
        )
    }
}
