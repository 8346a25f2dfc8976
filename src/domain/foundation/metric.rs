//! Metric enum for the tracked quantity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// One tracked quantity kind.
///
/// `Rolls` is the primary count; `Pallets` and `SquareArea` can be derived
/// from it. `SlitRolls` is recorded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Rolls,
    SlitRolls,
    Pallets,
    SquareArea,
}

impl Metric {
    /// Returns all metrics in grid order.
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Rolls,
            Metric::SlitRolls,
            Metric::Pallets,
            Metric::SquareArea,
        ]
    }

    /// Returns the default label used inside column names.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Rolls => "Rolls",
            Metric::SlitRolls => "SlitRolls",
            Metric::Pallets => "Pallets",
            Metric::SquareArea => "SquareArea",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("metric"));
        }
        // The production sheet labels area columns "SquareM".
        if trimmed.eq_ignore_ascii_case("SquareM") {
            return Ok(Metric::SquareArea);
        }
        Metric::all()
            .iter()
            .copied()
            .find(|metric| metric.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                ValidationError::invalid_format("metric", format!("unknown metric '{}'", trimmed))
            })
    }
}
