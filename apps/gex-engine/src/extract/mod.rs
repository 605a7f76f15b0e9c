//! Table extraction from a stacked-table worksheet.
//!
//! - [`segmenter`]: coarse split of the grid on sentinel rows
//! - [`header`]: header-row lookup and month discovery
//! - [`locator`]: per-month Calls/Puts table location
//! - [`projector`]: reduction to Strike and open-interest columns

pub mod header;
pub mod locator;
pub mod projector;
pub mod segmenter;

use crate::artifact::OptionRecord;
use crate::config::ColumnMapping;
use crate::error::{GexError, Result};
use crate::workbook::Grid;

pub use header::{discover_months, find_header_row, header_labels};
pub use locator::{LabeledTable, Side, TableRow, locate_month_table, table_title};
pub use projector::{ProjectedRow, Projection, project_columns, resolve_projection};
pub use segmenter::{ScanState, Segment, TableSegmenter, is_sentinel, segment_table};

/// Extract the intermediate rows for `month`, Calls first then Puts.
///
/// A month listing only one side is extracted with a warning. A month that
/// yields no rows, because neither table exists or both are empty, is
/// [`GexError::NoDataForMonth`].
pub fn extract_option_rows(
    grid: &Grid,
    month: &str,
    mapping: &ColumnMapping,
) -> Result<Vec<OptionRecord>> {
    let mut records = Vec::new();

    for side in Side::ALL {
        let Some(table) = locate_month_table(grid, month, side) else {
            tracing::warn!(month, %side, "No table found for side");
            continue;
        };

        let projected = project_columns(&table, mapping)?;
        tracing::info!(month, %side, rows = projected.len(), "Extracted table");

        records.extend(projected.into_iter().map(|row| OptionRecord {
            option_type: side.option_type(),
            strike: row.strike.text(),
            open_interest: row.open_interest.text(),
        }));
    }

    if records.is_empty() {
        return Err(GexError::NoDataForMonth(month.to_string()));
    }
    Ok(records)
}
