//! StockSession aggregate.
//!
//! A session is one user's working copy of the stock table between load and
//! save. It owns exactly one table snapshot; sessions never share tables.
//!
//! # Invariants
//!
//! - `resolver` is adapted to the current snapshot's naming scheme
//! - every cell changed since the last load or save is in `pending`
//! - the derivation engine only runs when `auto_derive` is set

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::foundation::{Metric, Period, SessionId, Site};
use crate::domain::inventory::{
    self, CellChange, CellEdit, ColumnResolver, DerivationEngine, EditOutcome, GridSlice,
    GrossSummary, InventoryError, Trend,
};
use crate::domain::table::{CellWrite, StockTable};

/// Deployment-wide choices a session is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Resolver before adaptation to a particular table.
    pub resolver: ColumnResolver,
    pub engine: DerivationEngine,
    pub auto_derive: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            resolver: ColumnResolver::default(),
            engine: DerivationEngine::default(),
            auto_derive: true,
        }
    }
}

/// Session aggregate - one snapshot of the stock table plus its edit state.
#[derive(Debug, Clone)]
pub struct StockSession {
    id: SessionId,
    settings: SessionSettings,
    table: StockTable,
    resolver: ColumnResolver,
    pending: BTreeSet<CellChange>,
    opened_at: DateTime<Utc>,
    loaded_at: DateTime<Utc>,
    last_saved_at: Option<DateTime<Utc>>,
    last_accessed_at: DateTime<Utc>,
}

impl StockSession {
    /// Opens a session over a freshly loaded table.
    pub fn open(table: StockTable, settings: SessionSettings) -> Self {
        Self::with_id(SessionId::new(), table, settings)
    }

    /// Opens a session with a known ID.
    pub fn with_id(id: SessionId, table: StockTable, settings: SessionSettings) -> Self {
        let now = Utc::now();
        let resolver = settings.resolver.clone().adapted_to(&table);
        Self {
            id,
            settings,
            table,
            resolver,
            pending: BTreeSet::new(),
            opened_at: now,
            loaded_at: now,
            last_saved_at: None,
            last_accessed_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn table(&self) -> &StockTable {
        &self.table
    }

    pub fn resolver(&self) -> &ColumnResolver {
        &self.resolver
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn last_accessed_at(&self) -> DateTime<Utc> {
        self.last_accessed_at
    }

    /// True when nothing has used the session for at least `ttl`.
    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_accessed_at)
            .to_std()
            .map(|idle| idle >= ttl)
            .unwrap_or(false)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending cells as partial writes, ordered by row then column.
    pub fn pending_writes(&self) -> Vec<CellWrite> {
        self.pending
            .iter()
            .map(|change| CellWrite {
                row: change.row,
                column: change.column.index(),
                value: self.table.value(change.row, Some(change.column)).to_string(),
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn grid(&self, site: Site, period: Period) -> GridSlice {
        inventory::grid_slice(&self.table, &self.resolver, site, period)
    }

    pub fn gross(&self, metric: Metric, period: Period) -> std::collections::BTreeMap<String, f64> {
        inventory::gross(&self.table, &self.resolver, metric, period)
    }

    pub fn gross_summary(&self, period: Period) -> GrossSummary {
        inventory::gross_summary(&self.table, &self.resolver, period)
    }

    /// # Errors
    ///
    /// `InventoryError::MaterialNotFound` for an unknown material.
    pub fn trend(&self, material: &str, site: Site, metric: Metric) -> Result<Trend, InventoryError> {
        inventory::trend(&self.table, &self.resolver, material, site, metric)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies grid edits for one site/period and records the changed cells.
    ///
    /// # Errors
    ///
    /// `InventoryError::MaterialNotFound` if any edit names an unknown
    /// material; nothing is applied in that case.
    pub fn apply_edits(
        &mut self,
        site: Site,
        period: Period,
        edits: &[CellEdit],
    ) -> Result<EditOutcome, InventoryError> {
        let engine = self.settings.auto_derive.then_some(&self.settings.engine);
        let outcome =
            inventory::apply_edits(&mut self.table, &self.resolver, engine, site, period, edits)?;
        self.pending.extend(outcome.changes.iter().copied());
        Ok(outcome)
    }

    /// Records a use of the session at `at`.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_accessed_at = self.last_accessed_at.max(at);
    }

    /// Records a successful save: nothing is pending any more.
    pub fn mark_saved(&mut self) {
        self.pending.clear();
        self.last_saved_at = Some(Utc::now());
    }

    /// Replaces the snapshot with a fresh load, discarding unsaved edits.
    ///
    /// Returns how many pending cells were discarded.
    pub fn replace_table(&mut self, table: StockTable) -> usize {
        let discarded = self.pending.len();
        self.resolver = self.settings.resolver.clone().adapted_to(&table);
        self.table = table;
        self.pending.clear();
        self.loaded_at = Utc::now();
        discarded
    }
}
