//! Lenient numeric parsing for spreadsheet text.
//!
//! Broker exports format numbers with thousands separators (`"25,600"`).
//! Every Strike/OI conversion goes through [`parse_lenient`] so the failure
//! mode is defined in one place, and [`MalformedCellPolicy`] decides what a
//! failure does to the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a cell failed numeric conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericParseError {
    /// Blank cell.
    #[error("cell is empty")]
    Empty,
    /// Text that is not a number after separator stripping.
    #[error("not a number")]
    Invalid,
    /// `nan`, `inf` and friends.
    #[error("value is not finite")]
    NonFinite,
}

/// Parse a number after trimming and stripping `,` separators.
pub fn parse_lenient(text: &str) -> Result<f64, NumericParseError> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(NumericParseError::Empty);
    }

    let value: f64 = cleaned.parse().map_err(|_| NumericParseError::Invalid)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericParseError::NonFinite)
    }
}

/// What to do with a row whose Strike or OI cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedCellPolicy {
    /// Abort the run with `MalformedNumericCell`.
    #[default]
    Fail,
    /// Drop the row and log a warning.
    Skip,
}
