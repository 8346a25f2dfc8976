//! Inventory module - the stock computation core.
//!
//! # Module Organization
//!
//! - `resolver` - (site, metric, period) to column name, with the sheet's exceptions
//! - `derivation` - pallets and area from roll counts
//! - `aggregation` - cross-site gross totals
//! - `trend` - monthly series for charting
//! - `grid` - the editable site/period slice

pub mod aggregation;
pub mod derivation;
mod errors;
pub mod grid;
pub mod resolver;
pub mod trend;

pub use aggregation::{gross, gross_summary, GrossRow, GrossSummary, MetricTotals};
pub use derivation::{DerivationEngine, DerivationMode, DerivedQuantities, MaterialConstants};
pub use errors::InventoryError;
pub use grid::{
    apply_edits, grid_slice, CellChange, CellEdit, EditOutcome, GridColumn, GridRow, GridSlice,
    SkippedEdit,
};
pub use resolver::{ColumnResolver, DEFAULT_AREA_LABEL, DEFAULT_LEGACY_AREA_SITE};
pub use trend::{trend, Trend, TrendPoint};
