//! Column Resolver - maps (site, metric, period) to the sheet's column name.
//!
//! The regular rule is `"{site}_{metric} {period}"`. Two irregularities exist
//! in the shared sheet:
//!
//! - the legacy site stores area without a site prefix: `"{area} {period}"`;
//! - KPark's February area column is labelled `Feb` whatever scheme the rest
//!   of the sheet uses.

use crate::domain::foundation::{Metric, Period, PeriodNaming, Site};
use crate::domain::table::schema::{constants, identity};
use crate::domain::table::{ColumnId, StockTable};

/// Default label for the area metric inside column names.
pub const DEFAULT_AREA_LABEL: &str = "SquareArea";

/// Site whose area columns have no site prefix unless configured otherwise.
pub const DEFAULT_LEGACY_AREA_SITE: Site = Site::CliffordRd;

/// Resolves observation column names for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnResolver {
    naming: PeriodNaming,
    legacy_area_site: Option<Site>,
    area_label: String,
}

impl ColumnResolver {
    /// Creates a resolver with the default legacy site and area label.
    pub fn new(naming: PeriodNaming) -> Self {
        Self {
            naming,
            legacy_area_site: Some(DEFAULT_LEGACY_AREA_SITE),
            area_label: DEFAULT_AREA_LABEL.to_string(),
        }
    }

    /// Sets the site whose area columns omit the prefix (`None` for no such site).
    pub fn with_legacy_area_site(mut self, site: Option<Site>) -> Self {
        self.legacy_area_site = site;
        self
    }

    /// Sets the label used for the area metric.
    pub fn with_area_label(mut self, label: impl Into<String>) -> Self {
        self.area_label = label.into();
        self
    }

    /// Switches to the period naming scheme `table` exposes.
    ///
    /// Keeps the current scheme when the header is inconclusive.
    pub fn adapted_to(mut self, table: &StockTable) -> Self {
        if let Some(naming) = PeriodNaming::detect(table.columns().iter().map(String::as_str)) {
            self.naming = naming;
        }
        self
    }

    pub fn naming(&self) -> PeriodNaming {
        self.naming
    }

    pub fn legacy_area_site(&self) -> Option<Site> {
        self.legacy_area_site
    }

    /// Returns the text used for `metric` inside column names.
    pub fn metric_label(&self, metric: Metric) -> &str {
        match metric {
            Metric::SquareArea => &self.area_label,
            other => other.label(),
        }
    }

    /// Returns the label used for `period` in this site/metric's column.
    pub fn period_label(&self, site: Site, metric: Metric, period: Period) -> &'static str {
        if site == Site::KPark && metric == Metric::SquareArea && period == Period::February {
            return "Feb";
        }
        self.naming.label(period)
    }

    /// Resolves the column name. Never fails; the column may not exist.
    pub fn resolve(&self, site: Site, metric: Metric, period: Period) -> String {
        let period_label = self.period_label(site, metric, period);
        let metric_label = self.metric_label(metric);

        if metric == Metric::SquareArea && self.legacy_area_site == Some(site) {
            format!("{} {}", metric_label, period_label)
        } else {
            format!("{}_{} {}", site, metric_label, period_label)
        }
    }

    /// Resolves and looks up the column in `table`.
    pub fn lookup(
        &self,
        table: &StockTable,
        site: Site,
        metric: Metric,
        period: Period,
    ) -> Option<ColumnId> {
        table.column(&self.resolve(site, metric, period))
    }

    /// Every column a freshly created sheet needs, in sheet order.
    pub fn template_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = identity::ALL
            .iter()
            .chain(constants::ALL.iter())
            .map(|name| name.to_string())
            .collect();

        for &period in Period::all() {
            for &site in Site::all() {
                for &metric in Metric::all() {
                    columns.push(self.resolve(site, metric, period));
                }
            }
        }
        columns
    }
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(PeriodNaming::default())
    }
}
