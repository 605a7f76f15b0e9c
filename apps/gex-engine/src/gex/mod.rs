//! Gamma exposure calculation and aggregation.
//!
//! [`compute_records`] turns intermediate rows into signed exposure under
//! one [`GexCalculator`]; [`GexProfile::from_records`] folds those into the
//! per-strike and cumulative series.

pub mod aggregator;
pub mod calculator;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::artifact::OptionRecord;
use crate::error::{GexError, Result};
use crate::numeric::{MalformedCellPolicy, parse_lenient};

pub use aggregator::{GexProfile, GexRecord, StrikeAggregate};
pub use calculator::{GexCalculator, MarketParams, d1, gamma, norm_pdf};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => f.write_str("Call"),
            Self::Put => f.write_str("Put"),
        }
    }
}

/// Column names used when reporting malformed cells.
const STRIKE_COLUMN: &str = "Strike";
const OI_COLUMN: &str = "OI";

/// Parse and price every row, preserving input order.
///
/// Row numbers in errors and warnings are 1-based data rows of the
/// intermediate artifact.
pub fn compute_records(
    rows: &[OptionRecord],
    calculator: &GexCalculator,
    policy: MalformedCellPolicy,
) -> Result<Vec<GexRecord>> {
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        let parsed = parse_cell(row_number, STRIKE_COLUMN, &row.strike).and_then(|strike| {
            parse_cell(row_number, OI_COLUMN, &row.open_interest).map(|oi| (strike, oi))
        });

        let (strike, open_interest) = match (parsed, policy) {
            (Ok(values), _) => values,
            (Err(err), MalformedCellPolicy::Fail) => return Err(err),
            (Err(err), MalformedCellPolicy::Skip) => {
                tracing::warn!(row = row_number, error = %err, "Skipping malformed row");
                continue;
            }
        };

        records.push(GexRecord {
            option_type: row.option_type,
            strike,
            open_interest,
            gex: calculator.exposure(strike, open_interest, row.option_type),
        });
    }

    tracing::info!(
        input_rows = rows.len(),
        records = records.len(),
        "Computed gamma exposure"
    );
    Ok(records)
}

fn parse_cell(row: usize, column: &'static str, value: &str) -> Result<f64> {
    parse_lenient(value).map_err(|source| GexError::MalformedNumericCell {
        row,
        column,
        value: value.to_string(),
        source,
    })
}
