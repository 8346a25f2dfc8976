//! Spreadsheet Adapter
//!
//! `SheetsTableStore` implements the BackingStore port against a hosted
//! spreadsheet, authenticating as a service account.

mod a1;
mod service_account;
mod sheets_store;

pub use service_account::{
    normalize_private_key, ServiceAccountAuthenticator, ServiceAccountCredentials,
    DEFAULT_TOKEN_URI, SPREADSHEETS_SCOPE,
};
pub use sheets_store::{SheetsConfig, SheetsTableStore, DEFAULT_API_BASE_URL, DEFAULT_WORKSHEET};
