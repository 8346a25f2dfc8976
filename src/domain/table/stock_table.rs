//! StockTable - the in-memory snapshot of the stock sheet.
//!
//! Columns are addressed by name only at the edges: callers obtain a
//! [`ColumnId`] once and read cells through it. Reading through a missing
//! column yields the empty cell rather than an error.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::schema::identity;

/// Errors raised when building a table from raw rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Table has no header row")]
    MissingHeader,

    #[error("Table has no '{0}' column")]
    MissingIdentityColumn(&'static str),
}

/// Handle to a column that exists in a particular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ColumnId(usize);

impl ColumnId {
    /// Returns the 0-based column position.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A single cell to write back, addressed by record and column position.
///
/// `row` counts records, not sheet rows: record 0 sits directly below the
/// header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellWrite {
    pub row: usize,
    pub column: usize,
    pub value: String,
}

/// One row of the sheet; cells are aligned with the table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    cells: Vec<String>,
}

impl Record {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Rows keyed by material, with dynamically named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockTable {
    columns: Vec<String>,
    index: HashMap<String, ColumnId>,
    records: Vec<Record>,
    material_column: ColumnId,
}

impl StockTable {
    /// Creates an empty table with the given header.
    ///
    /// # Errors
    ///
    /// Returns `TableError::MissingIdentityColumn` if there is no `Material`
    /// column.
    pub fn new(columns: Vec<String>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            index
                .entry(name.trim().to_string())
                .or_insert(ColumnId(position));
        }

        let material_column = *index
            .get(identity::MATERIAL)
            .ok_or(TableError::MissingIdentityColumn(identity::MATERIAL))?;

        Ok(Self {
            columns,
            index,
            records: Vec::new(),
            material_column,
        })
    }

    /// Builds a table from raw rows where the first row is the header.
    ///
    /// Ragged rows are padded with empty cells (the spreadsheet API trims
    /// trailing blanks) and cells beyond the header are dropped.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let mut rows = rows.into_iter();
        let header = rows.next().ok_or(TableError::MissingHeader)?;
        if header.iter().all(|cell| cell.trim().is_empty()) {
            return Err(TableError::MissingHeader);
        }

        let mut table = Self::new(header)?;
        for row in rows {
            table.push_record(row);
        }
        Ok(table)
    }

    /// Appends a record, padding or truncating it to the header width.
    pub fn push_record(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.records.push(Record { cells });
    }

    /// Returns the header row.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Looks up a column by name (surrounding whitespace ignored).
    pub fn column(&self, name: &str) -> Option<ColumnId> {
        self.index.get(name.trim()).copied()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the material key of a row (trimmed).
    pub fn material(&self, row: usize) -> &str {
        self.value(row, Some(self.material_column)).trim()
    }

    /// Finds the first row whose material key matches.
    ///
    /// A blank key never matches.
    pub fn find_material(&self, material: &str) -> Option<usize> {
        let wanted = material.trim();
        if wanted.is_empty() {
            return None;
        }
        (0..self.records.len()).find(|&row| self.material(row) == wanted)
    }

    /// Returns the text of a cell, or `""` when the column is absent or the
    /// row is out of range.
    pub fn value(&self, row: usize, column: Option<ColumnId>) -> &str {
        column
            .and_then(|column| {
                self.records
                    .get(row)
                    .and_then(|record| record.cells.get(column.0))
            })
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Overwrites a cell. Returns `true` if its text changed.
    pub fn set(&mut self, row: usize, column: ColumnId, value: impl Into<String>) -> bool {
        let Some(cell) = self
            .records
            .get_mut(row)
            .and_then(|record| record.cells.get_mut(column.0))
        else {
            return false;
        };
        let value = value.into();
        if *cell == value {
            return false;
        }
        *cell = value;
        true
    }

    /// Applies partial writes. Out-of-range coordinates are ignored.
    pub fn apply_writes(&mut self, writes: &[CellWrite]) {
        for write in writes {
            if write.column < self.columns.len() {
                self.set(write.row, ColumnId(write.column), write.value.clone());
            }
        }
    }

    /// Returns the header followed by every record, ready for the store.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.columns.clone())
            .chain(self.records.iter().map(|record| record.cells.clone()))
            .collect()
    }
}
