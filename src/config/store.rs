//! Backing store configuration

use std::time::Duration;

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::sheets::{
    ServiceAccountCredentials, SheetsConfig, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URI,
    DEFAULT_WORKSHEET,
};
use crate::application::SaveMode;

/// Which adapter holds the stock table
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process table, lost on restart
    #[default]
    Memory,
    /// YAML file on local disk
    File,
    /// Hosted spreadsheet
    Sheets,
}

/// Store configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path of the YAML table (file backend)
    pub file_path: Option<String>,

    /// Full-table rewrite or changed cells only
    #[serde(default)]
    pub save_mode: SaveMode,

    #[serde(default)]
    pub sheets: SheetsSettings,
}

/// Spreadsheet connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsSettings {
    pub spreadsheet_id: Option<String>,

    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    /// Service account email
    pub client_email: Option<String>,

    /// Service account PEM key; literal `\n` sequences are accepted
    pub private_key: Option<Secret<String>>,

    #[serde(default = "default_token_uri")]
    pub token_uri: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_sheets_timeout")]
    pub timeout_secs: u64,
}

impl Default for SheetsSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            worksheet: default_worksheet(),
            client_email: None,
            private_key: None,
            token_uri: default_token_uri(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_sheets_timeout(),
        }
    }
}

impl SheetsSettings {
    /// Adapter configuration, if a spreadsheet id is set
    pub fn sheets_config(&self) -> Option<SheetsConfig> {
        self.spreadsheet_id.as_ref().map(|id| {
            SheetsConfig::new(id)
                .with_worksheet(&self.worksheet)
                .with_api_base_url(&self.api_base_url)
                .with_timeout(Duration::from_secs(self.timeout_secs))
        })
    }

    /// Service account credentials, if both email and key are set
    pub fn credentials(&self) -> Option<ServiceAccountCredentials> {
        use secrecy::ExposeSecret;

        match (&self.client_email, &self.private_key) {
            (Some(email), Some(key)) => Some(
                ServiceAccountCredentials::new(email, key.expose_secret())
                    .with_token_uri(&self.token_uri),
            ),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.spreadsheet_id.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingRequired("store.sheets.spreadsheet_id"));
        }
        if self.client_email.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingRequired("store.sheets.client_email"));
        }
        if self.private_key.is_none() {
            return Err(ValidationError::MissingRequired("store.sheets.private_key"));
        }
        for (field, value) in [
            ("store.sheets.token_uri", &self.token_uri),
            ("store.sheets.api_base_url", &self.api_base_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ValidationError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl StoreConfig {
    /// Validate the settings the chosen backend needs
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StoreBackend::Memory => Ok(()),
            StoreBackend::File => match self.file_path.as_deref() {
                Some(path) if !path.trim().is_empty() => Ok(()),
                _ => Err(ValidationError::MissingRequired("store.file_path")),
            },
            StoreBackend::Sheets => self.sheets.validate(),
        }
    }
}

fn default_worksheet() -> String {
    DEFAULT_WORKSHEET.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_sheets_timeout() -> u64 {
    30
}
