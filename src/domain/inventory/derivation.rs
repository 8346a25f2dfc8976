//! Derivation Engine - pallets and area from roll counts.
//!
//! The derived values are a pure function of the current `Rolls` cell and the
//! material's conversion constants, so re-running the engine on unchanged
//! input writes nothing.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    format_quantity, parse_numeric, parse_numeric_or_zero, round2, Metric, Period, Site,
};
use crate::domain::table::schema::constants;
use crate::domain::table::StockTable;

use super::grid::CellChange;
use super::resolver::ColumnResolver;

/// Which SquareArea formula a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivationMode {
    /// `SquareArea = Rolls * meters_per_roll`
    #[default]
    RollBased,
    /// `SquareArea = Pallets * area_per_pallet + Rolls * meters_per_roll`
    PalletAndRollBased,
}

/// Per-material conversion constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialConstants {
    pub meters_per_roll: f64,
    pub rolls_per_pallet: f64,
    pub area_per_pallet: f64,
}

impl MaterialConstants {
    /// Reads the constants of one row.
    ///
    /// Missing or non-numeric values become `0`, except `rolls_per_pallet`
    /// which becomes `1`.
    pub fn from_row(table: &StockTable, row: usize) -> Self {
        let read = |name: &str| parse_numeric(table.value(row, table.column(name)));
        Self {
            meters_per_roll: read(constants::METERS_PER_ROLL).unwrap_or(0.0),
            rolls_per_pallet: read(constants::ROLLS_PER_PALLET).unwrap_or(1.0),
            area_per_pallet: read(constants::AREA_PER_PALLET).unwrap_or(0.0),
        }
    }
}

impl Default for MaterialConstants {
    fn default() -> Self {
        Self {
            meters_per_roll: 0.0,
            rolls_per_pallet: 1.0,
            area_per_pallet: 0.0,
        }
    }
}

/// Values computed from a roll count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    pub pallets: f64,
    pub square_area: f64,
}

/// Computes dependent metrics from `Rolls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivationEngine {
    mode: DerivationMode,
}

impl DerivationEngine {
    pub fn new(mode: DerivationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DerivationMode {
        self.mode
    }

    /// Derives pallets and area for one roll count.
    pub fn derive(&self, rolls: f64, constants: &MaterialConstants) -> DerivedQuantities {
        let pallets = if constants.rolls_per_pallet > 0.0 {
            round2(rolls / constants.rolls_per_pallet)
        } else {
            0.0
        };

        let roll_area = rolls * constants.meters_per_roll;
        let square_area = match self.mode {
            DerivationMode::RollBased => round2(roll_area),
            DerivationMode::PalletAndRollBased => {
                round2(pallets * constants.area_per_pallet + roll_area)
            }
        };

        DerivedQuantities {
            pallets,
            square_area,
        }
    }

    /// Recomputes Pallets and SquareArea for `rows` at one site/period.
    ///
    /// Target columns absent from the table are skipped. Returns the cells
    /// whose text actually changed.
    pub fn apply(
        &self,
        table: &mut StockTable,
        resolver: &ColumnResolver,
        site: Site,
        period: Period,
        rows: &[usize],
    ) -> Vec<CellChange> {
        let rolls_column = resolver.lookup(table, site, Metric::Rolls, period);
        let pallets_column = resolver.lookup(table, site, Metric::Pallets, period);
        let area_column = resolver.lookup(table, site, Metric::SquareArea, period);

        let mut changes = Vec::new();
        for &row in rows {
            let rolls = parse_numeric_or_zero(table.value(row, rolls_column));
            let derived = self.derive(rolls, &MaterialConstants::from_row(table, row));

            let targets = [
                (pallets_column, derived.pallets),
                (area_column, derived.square_area),
            ];
            for (column, value) in targets {
                let Some(column) = column else { continue };
                if table.set(row, column, format_quantity(value)) {
                    changes.push(CellChange { row, column });
                }
            }
        }
        changes
    }
}
