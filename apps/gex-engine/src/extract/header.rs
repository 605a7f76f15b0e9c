//! Header-row resolution and month discovery.

use crate::config::ColumnMapping;
use crate::error::{GexError, Result};
use crate::workbook::Grid;

use super::segmenter::{TOTALS_SENTINEL, segment_table};

/// Find the row in `[start, end]` carrying a cell equal to `month`
/// (case-insensitive, trimmed).
///
/// Falls back to `start` when no row qualifies; a wrong guess surfaces
/// downstream as a missing-column error.
#[must_use]
pub fn find_header_row(grid: &Grid, start: usize, end: usize) -> usize {
    find_header_row_for(grid, start, end, "month")
}

fn find_header_row_for(grid: &Grid, start: usize, end: usize, label: &str) -> usize {
    grid.rows_from(start)
        .take_while(|(index, _)| *index <= end)
        .find(|(_, row)| row.iter().any(|cell| ColumnMapping::matches(label, &cell.text())))
        .map_or(start, |(index, _)| index)
}

/// Text labels of one header row.
#[must_use]
pub fn header_labels(grid: &Grid, row: usize) -> Vec<String> {
    grid.row(row).iter().map(|cell| cell.text()).collect()
}

/// List the months available in the first table of the grid.
///
/// Labels are trimmed, deduplicated in first-seen order, and `TOTALS` rows
/// (any case) are dropped.
pub fn discover_months(grid: &Grid, mapping: &ColumnMapping) -> Result<Vec<String>> {
    let segments = segment_table(grid);
    let first = segments.first().ok_or(GexError::NoTablesFound)?;

    let header_row = find_header_row_for(grid, first.start_row, first.end_row, &mapping.month);
    let columns = header_labels(grid, header_row);
    let month_column = columns
        .iter()
        .position(|label| ColumnMapping::matches(&mapping.month, label))
        .ok_or_else(|| GexError::RequiredColumnMissing {
            column: mapping.month.clone(),
            available: columns.clone(),
        })?;

    let mut months: Vec<String> = Vec::new();
    for (index, _) in grid.rows_from(header_row + 1) {
        if index > first.end_row {
            break;
        }
        let label = grid.cell(index, month_column).text();
        if label.is_empty() || label.to_uppercase() == TOTALS_SENTINEL {
            continue;
        }
        if !months.contains(&label) {
            months.push(label);
        }
    }

    tracing::info!(
        header_row,
        count = months.len(),
        "Discovered months in first table"
    );
    Ok(months)
}
