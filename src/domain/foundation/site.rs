//! Site enum for the physical stock locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A physical inventory location.
///
/// The set is fixed; its order is the summation order used by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Site {
    CliffordRd,
    KPark,
    HarrisDrive,
}

impl Site {
    /// Returns all sites in canonical order.
    pub fn all() -> &'static [Site] {
        &[Site::CliffordRd, Site::KPark, Site::HarrisDrive]
    }

    /// Returns the name used as the column prefix in the stock sheet.
    pub fn column_prefix(&self) -> &'static str {
        match self {
            Site::CliffordRd => "CliffordRd",
            Site::KPark => "KPark",
            Site::HarrisDrive => "HarrisDrive",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_prefix())
    }
}

impl FromStr for Site {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("site"));
        }
        Site::all()
            .iter()
            .copied()
            .find(|site| site.column_prefix().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::invalid_format("site", format!("unknown site '{}'", trimmed)))
    }
}
