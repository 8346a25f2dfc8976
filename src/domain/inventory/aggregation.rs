//! Aggregator - cross-site gross totals per material.
//!
//! Aggregation is total: a missing column or an unparseable cell contributes
//! zero and never aborts the loop.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::foundation::{parse_numeric_or_zero, Metric, Period, Site};
use crate::domain::table::schema::identity;
use crate::domain::table::{ColumnId, StockTable};

use super::resolver::ColumnResolver;

/// Gross totals of every metric for one material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTotals {
    pub rolls: f64,
    pub slit_rolls: f64,
    pub pallets: f64,
    pub square_area: f64,
}

impl MetricTotals {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Rolls => self.rolls,
            Metric::SlitRolls => self.slit_rolls,
            Metric::Pallets => self.pallets,
            Metric::SquareArea => self.square_area,
        }
    }

    fn slot(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Rolls => &mut self.rolls,
            Metric::SlitRolls => &mut self.slit_rolls,
            Metric::Pallets => &mut self.pallets,
            Metric::SquareArea => &mut self.square_area,
        }
    }
}

/// One line of the gross stock summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrossRow {
    pub material: String,
    pub code: String,
    #[serde(flatten)]
    pub totals: MetricTotals,
}

/// Gross totals of all metrics for one period, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrossSummary {
    pub period: Period,
    pub rows: Vec<GrossRow>,
}

/// Resolved columns for one metric/period, one per site in canonical order.
fn site_columns(
    table: &StockTable,
    resolver: &ColumnResolver,
    metric: Metric,
    period: Period,
) -> Vec<Option<ColumnId>> {
    Site::all()
        .iter()
        .map(|&site| resolver.lookup(table, site, metric, period))
        .collect()
}

fn row_total(table: &StockTable, row: usize, columns: &[Option<ColumnId>]) -> f64 {
    columns
        .iter()
        .map(|&column| parse_numeric_or_zero(table.value(row, column)))
        .sum()
}

/// Sums `metric` across all sites for `period`, per material.
///
/// Rows with a blank material key are ignored; duplicate keys accumulate into
/// one entry.
pub fn gross(
    table: &StockTable,
    resolver: &ColumnResolver,
    metric: Metric,
    period: Period,
) -> BTreeMap<String, f64> {
    let columns = site_columns(table, resolver, metric, period);

    let mut totals = BTreeMap::new();
    for row in 0..table.len() {
        let material = table.material(row);
        if material.is_empty() {
            continue;
        }
        *totals.entry(material.to_string()).or_insert(0.0) += row_total(table, row, &columns);
    }
    totals
}

/// Builds the gross summary table: every metric's cross-site total for each
/// record.
pub fn gross_summary(table: &StockTable, resolver: &ColumnResolver, period: Period) -> GrossSummary {
    let per_metric: Vec<(Metric, Vec<Option<ColumnId>>)> = Metric::all()
        .iter()
        .map(|&metric| (metric, site_columns(table, resolver, metric, period)))
        .collect();
    let code_column = table.column(identity::CODE);

    let rows = (0..table.len())
        .filter(|&row| !table.material(row).is_empty())
        .map(|row| {
            let mut totals = MetricTotals::default();
            for (metric, columns) in &per_metric {
                *totals.slot(*metric) = row_total(table, row, columns);
            }
            GrossRow {
                material: table.material(row).to_string(),
                code: table.value(row, code_column).to_string(),
                totals,
            }
        })
        .collect();

    GrossSummary { period, rows }
}

#[cfg(test)]
#[path = "aggregation_test.rs"]
mod aggregation_test;
