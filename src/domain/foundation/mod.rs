//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the stock domain.

mod errors;
mod ids;
mod metric;
mod period;
mod quantity;
mod site;

pub use errors::ValidationError;
pub use ids::SessionId;
pub use metric::Metric;
pub use period::{Period, PeriodNaming};
pub use quantity::{format_quantity, parse_numeric, parse_numeric_or_zero, round2};
pub use site::Site;
