//! Grid - the editable (site, period) slice of the stock table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::foundation::{Metric, Period, Site};
use crate::domain::table::schema::identity;
use crate::domain::table::{ColumnId, StockTable};

use super::derivation::DerivationEngine;
use super::errors::InventoryError;
use super::resolver::ColumnResolver;

/// A cell that differs from the last loaded or saved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellChange {
    pub row: usize,
    pub column: ColumnId,
}

/// One user edit inside a grid slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellEdit {
    pub material: String,
    pub metric: Metric,
    pub value: String,
}

impl CellEdit {
    pub fn new(material: impl Into<String>, metric: Metric, value: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            metric,
            value: value.into(),
        }
    }
}

/// An edit that targeted a column this table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEdit {
    pub material: String,
    pub metric: Metric,
    pub column: String,
}

/// Result of applying a batch of edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Every cell whose text changed, user edits first, then derived cells.
    pub changes: Vec<CellChange>,
    /// Edits dropped because their column is absent.
    pub skipped: Vec<SkippedEdit>,
    /// Rows whose derived metrics were recomputed.
    pub derived_rows: Vec<usize>,
}

/// Column descriptor for the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridColumn {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<Metric>,
    pub read_only: bool,
}

/// One row of the grid, cells aligned with [`GridSlice::columns`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub material: String,
    pub cells: Vec<String>,
}

/// The identity columns plus whichever of the site/period's metric columns
/// exist in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSlice {
    pub site: Site,
    pub period: Period,
    pub columns: Vec<GridColumn>,
    pub rows: Vec<GridRow>,
}

/// Builds the grid slice for one site and period.
pub fn grid_slice(
    table: &StockTable,
    resolver: &ColumnResolver,
    site: Site,
    period: Period,
) -> GridSlice {
    let mut columns = Vec::new();
    let mut handles: Vec<Option<ColumnId>> = Vec::new();

    for name in identity::ALL {
        columns.push(GridColumn {
            name: name.to_string(),
            metric: None,
            read_only: true,
        });
        handles.push(table.column(name));
    }

    for &metric in Metric::all() {
        let name = resolver.resolve(site, metric, period);
        if let Some(handle) = table.column(&name) {
            columns.push(GridColumn {
                name,
                metric: Some(metric),
                read_only: false,
            });
            handles.push(Some(handle));
        }
    }

    let rows = (0..table.len())
        .map(|row| GridRow {
            material: table.material(row).to_string(),
            cells: handles
                .iter()
                .map(|&handle| table.value(row, handle).to_string())
                .collect(),
        })
        .collect();

    GridSlice {
        site,
        period,
        columns,
        rows,
    }
}

/// Applies a batch of edits to one site/period slice.
///
/// The batch is validated first: an unknown material fails the whole batch and
/// leaves the table untouched. Rows whose `Rolls` text changed are re-derived
/// when an engine is supplied.
pub fn apply_edits(
    table: &mut StockTable,
    resolver: &ColumnResolver,
    engine: Option<&DerivationEngine>,
    site: Site,
    period: Period,
    edits: &[CellEdit],
) -> Result<EditOutcome, InventoryError> {
    let rows = edits
        .iter()
        .map(|edit| {
            table
                .find_material(&edit.material)
                .ok_or_else(|| InventoryError::MaterialNotFound(edit.material.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut outcome = EditOutcome::default();
    for (edit, row) in edits.iter().zip(rows) {
        let name = resolver.resolve(site, edit.metric, period);
        let Some(column) = table.column(&name) else {
            debug!(material = %edit.material, column = %name, "Skipping edit to absent column");
            outcome.skipped.push(SkippedEdit {
                material: edit.material.clone(),
                metric: edit.metric,
                column: name,
            });
            continue;
        };

        if table.set(row, column, edit.value.trim()) {
            outcome.changes.push(CellChange { row, column });
            if edit.metric == Metric::Rolls && !outcome.derived_rows.contains(&row) {
                outcome.derived_rows.push(row);
            }
        }
    }

    match engine {
        Some(engine) => {
            let derived = engine.apply(table, resolver, site, period, &outcome.derived_rows);
            outcome.changes.extend(derived);
        }
        None => outcome.derived_rows.clear(),
    }

    Ok(outcome)
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
