//! Period (calendar month) value object and its naming schemes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// One calendar month of observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Period {
    /// Returns all twelve months in calendar order.
    pub fn all() -> &'static [Period] {
        &[
            Period::January,
            Period::February,
            Period::March,
            Period::April,
            Period::May,
            Period::June,
            Period::July,
            Period::August,
            Period::September,
            Period::October,
            Period::November,
            Period::December,
        ]
    }

    /// Returns the full month name.
    pub fn full_name(&self) -> &'static str {
        match self {
            Period::January => "January",
            Period::February => "February",
            Period::March => "March",
            Period::April => "April",
            Period::May => "May",
            Period::June => "June",
            Period::July => "July",
            Period::August => "August",
            Period::September => "September",
            Period::October => "October",
            Period::November => "November",
            Period::December => "December",
        }
    }

    /// Returns the label the abbreviated sheets use.
    ///
    /// Not strictly three letters: the sheets spell out March through July.
    pub fn abbreviated_name(&self) -> &'static str {
        match self {
            Period::January => "Jan",
            Period::February => "Feb",
            Period::March => "March",
            Period::April => "April",
            Period::May => "May",
            Period::June => "June",
            Period::July => "July",
            Period::August => "Aug",
            Period::September => "Sep",
            Period::October => "Oct",
            Period::November => "Nov",
            Period::December => "Dec",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    /// Accepts the full name, the sheet abbreviation, or the first three
    /// letters, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("period"));
        }
        Period::all()
            .iter()
            .copied()
            .find(|p| {
                p.full_name().eq_ignore_ascii_case(trimmed)
                    || p.abbreviated_name().eq_ignore_ascii_case(trimmed)
                    || p.full_name()[..3].eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| {
                ValidationError::invalid_format("period", format!("unknown month '{}'", trimmed))
            })
    }
}

/// How a table spells months in its column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodNaming {
    #[default]
    Abbreviated,
    Full,
}

impl PeriodNaming {
    /// Returns the label for `period` under this scheme.
    pub fn label(&self, period: Period) -> &'static str {
        match self {
            PeriodNaming::Abbreviated => period.abbreviated_name(),
            PeriodNaming::Full => period.full_name(),
        }
    }

    /// Detects the scheme a table uses from its column names.
    ///
    /// Only labels that differ between the schemes count as evidence. Returns
    /// `None` when neither scheme has more matching columns than the other.
    pub fn detect<'a, I>(columns: I) -> Option<PeriodNaming>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut abbreviated = 0usize;
        let mut full = 0usize;

        for column in columns {
            let Some((_, suffix)) = column.trim().rsplit_once(' ') else {
                continue;
            };
            for period in Period::all() {
                if period.abbreviated_name() == period.full_name() {
                    continue;
                }
                if suffix == period.abbreviated_name() {
                    abbreviated += 1;
                } else if suffix == period.full_name() {
                    full += 1;
                }
            }
        }

        match abbreviated.cmp(&full) {
            std::cmp::Ordering::Greater => Some(PeriodNaming::Abbreviated),
            std::cmp::Ordering::Less => Some(PeriodNaming::Full),
            std::cmp::Ordering::Equal => None,
        }
    }
}
