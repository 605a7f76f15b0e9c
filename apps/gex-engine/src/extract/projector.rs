//! Reduce a located table to its Strike and open-interest columns.

use crate::config::ColumnMapping;
use crate::error::{GexError, Result};
use crate::workbook::Cell;

use super::locator::LabeledTable;

/// How the two columns were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Both labels found in the header row.
    Named {
        /// Index of the strike column.
        strike: usize,
        /// Index of the open-interest column.
        open_interest: usize,
    },
    /// Neither label found; the first two columns are used as-is.
    Positional,
}

impl Projection {
    /// Column indices as `(strike, open_interest)`.
    #[must_use]
    pub const fn indices(&self) -> (usize, usize) {
        match self {
            Self::Named {
                strike,
                open_interest,
            } => (*strike, *open_interest),
            Self::Positional => (0, 1),
        }
    }
}

/// Strike/OI cell pair for one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    /// Row index in the source grid.
    pub grid_row: usize,
    /// Strike cell.
    pub strike: Cell,
    /// Open-interest cell.
    pub open_interest: Cell,
}

/// Decide which columns hold Strike and OI.
///
/// The first header matching each label wins. When neither label is
/// present the table is read positionally if the mapping allows it; a table
/// with only one of the two labels cannot be projected.
pub fn resolve_projection(table: &LabeledTable, mapping: &ColumnMapping) -> Result<Projection> {
    let find = |label: &str| {
        table
            .columns
            .iter()
            .position(|header| ColumnMapping::matches(label, header))
    };

    match (find(&mapping.strike), find(&mapping.open_interest)) {
        (Some(strike), Some(open_interest)) => Ok(Projection::Named {
            strike,
            open_interest,
        }),
        (None, None) if mapping.positional_fallback => {
            tracing::warn!(
                title_row = table.title_row,
                strike_label = %mapping.strike,
                open_interest_label = %mapping.open_interest,
                columns = ?table.columns,
                "Strike/OI columns not found, reading the first two columns positionally"
            );
            Ok(Projection::Positional)
        }
        (None, _) => Err(GexError::RequiredColumnMissing {
            column: mapping.strike.clone(),
            available: table.columns.clone(),
        }),
        (Some(_), None) => Err(GexError::RequiredColumnMissing {
            column: mapping.open_interest.clone(),
            available: table.columns.clone(),
        }),
    }
}

/// Project every row of `table` to a Strike/OI pair.
pub fn project_columns(table: &LabeledTable, mapping: &ColumnMapping) -> Result<Vec<ProjectedRow>> {
    let (strike, open_interest) = resolve_projection(table, mapping)?.indices();

    Ok(table
        .rows
        .iter()
        .map(|row| ProjectedRow {
            grid_row: row.grid_row,
            strike: row.cell(strike),
            open_interest: row.cell(open_interest),
        })
        .collect())
}
