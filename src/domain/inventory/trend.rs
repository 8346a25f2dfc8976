//! Trend Extractor - one material's monthly series at one site.

use serde::Serialize;

use crate::domain::foundation::{parse_numeric_or_zero, Metric, Period, Site};
use crate::domain::table::StockTable;

use super::errors::InventoryError;
use super::resolver::ColumnResolver;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period: Period,
    /// Month label as the table spells it, for chart axes.
    pub label: String,
    pub value: f64,
}

/// Twelve points, calendar order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub material: String,
    pub site: Site,
    pub metric: Metric,
    pub points: Vec<TrendPoint>,
}

impl Trend {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Extracts the monthly series of `metric` for `material` at `site`.
///
/// # Errors
///
/// Returns `InventoryError::MaterialNotFound` if no row has that material key.
/// Missing columns and malformed cells yield zero.
pub fn trend(
    table: &StockTable,
    resolver: &ColumnResolver,
    material: &str,
    site: Site,
    metric: Metric,
) -> Result<Trend, InventoryError> {
    let row = table
        .find_material(material)
        .ok_or_else(|| InventoryError::MaterialNotFound(material.to_string()))?;

    let points = Period::all()
        .iter()
        .map(|&period| TrendPoint {
            period,
            label: resolver.period_label(site, metric, period).to_string(),
            value: parse_numeric_or_zero(
                table.value(row, resolver.lookup(table, site, metric, period)),
            ),
        })
        .collect();

    Ok(Trend {
        material: table.material(row).to_string(),
        site,
        metric,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::PeriodNaming;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn table() -> StockTable {
        StockTable::from_rows(vec![
            row(&[
                "Material",
                "CliffordRd_Rolls Jan",
                "CliffordRd_Rolls Feb",
                "CliffordRd_Rolls Dec",
                "SquareArea March",
                "KPark_SquareArea Feb",
            ]),
            row(&["M1", "10", "1,200", "x", "44.5", "9"]),
            row(&["Empty"]),
        ])
        .unwrap()
    }

    #[test]
    fn extracts_twelve_calendar_ordered_points() {
        let resolver = ColumnResolver::new(PeriodNaming::Abbreviated);
        let trend = trend(&table(), &resolver, "M1", Site::CliffordRd, Metric::Rolls).unwrap();

        assert_eq!(trend.points.len(), 12);
        let periods: Vec<Period> = trend.points.iter().map(|p| p.period).collect();
        assert_eq!(periods, Period::all().to_vec());
        assert_eq!(trend.values()[0], 10.0);
        assert_eq!(trend.values()[1], 1200.0);
        assert_eq!(trend.values()[11], 0.0);
        assert_eq!(trend.points[2].label, "March");
    }

    #[test]
    fn all_empty_material_yields_twelve_zeros() {
        let resolver = ColumnResolver::new(PeriodNaming::Abbreviated);
        let trend = trend(&table(), &resolver, "Empty", Site::CliffordRd, Metric::Rolls).unwrap();
        assert_eq!(trend.values(), vec![0.0; 12]);
    }

    #[test]
    fn legacy_site_area_series() {
        let resolver = ColumnResolver::new(PeriodNaming::Abbreviated);
        let trend = trend(&table(), &resolver, "M1", Site::CliffordRd, Metric::SquareArea).unwrap();
        assert_eq!(trend.values()[2], 44.5);
    }

    #[test]
    fn kpark_area_series_reads_feb_column_under_full_naming() {
        let resolver = ColumnResolver::new(PeriodNaming::Full);
        let trend = trend(&table(), &resolver, "M1", Site::KPark, Metric::SquareArea).unwrap();
        assert_eq!(trend.values()[1], 9.0);
        assert_eq!(trend.points[1].label, "Feb");
        assert_eq!(trend.points[0].label, "January");
    }

    #[test]
    fn unknown_material_is_reported() {
        let resolver = ColumnResolver::default();
        let err = trend(&table(), &resolver, "Nope", Site::KPark, Metric::Rolls).unwrap_err();
        assert_eq!(err, InventoryError::MaterialNotFound("Nope".to_string()));
    }
}
