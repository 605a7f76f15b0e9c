//! Per-month Calls/Puts table location.
//!
//! Fine-grained tables are introduced by a title row whose first column is
//! exactly `"{month} {side}"` (e.g. `MAR 26 Calls`). The row after the title
//! carries column labels, data starts two rows after the title, and the
//! table runs until the next sentinel row or the end of the grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gex::OptionType;
use crate::workbook::{Cell, Grid};

use super::header::header_labels;
use super::segmenter::next_sentinel_row;

/// Which half of a month's chain a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Call options table.
    Calls,
    /// Put options table.
    Puts,
}

impl Side {
    /// Both sides, Calls first.
    pub const ALL: [Self; 2] = [Self::Calls, Self::Puts];

    /// Title suffix used in the workbook.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calls => "Calls",
            Self::Puts => "Puts",
        }
    }

    /// Option type of the rows in this table.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        match self {
            Self::Calls => OptionType::Call,
            Self::Puts => OptionType::Put,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact title text of a month/side table.
#[must_use]
pub fn table_title(month: &str, side: Side) -> String {
    format!("{month} {side}")
}

/// One data row of a located table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Row index in the source grid.
    pub grid_row: usize,
    /// Cells of the row.
    pub cells: Vec<Cell>,
}

impl TableRow {
    /// Cell at `column`, empty when the row is short.
    #[must_use]
    pub fn cell(&self, column: usize) -> Cell {
        self.cells.get(column).cloned().unwrap_or_default()
    }
}

/// A located sub-table with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    /// Row index of the title row.
    pub title_row: usize,
    /// Column labels from the header row.
    pub columns: Vec<String>,
    /// Non-empty data rows, in grid order.
    pub rows: Vec<TableRow>,
}

/// Locate and extract the `month`/`side` table.
///
/// Returns `None` when no title row matches; a tenor may list only one side.
#[must_use]
pub fn locate_month_table(grid: &Grid, month: &str, side: Side) -> Option<LabeledTable> {
    let title = table_title(month, side);
    let title_row = grid
        .rows_from(0)
        .map(|(index, _)| index)
        .find(|&index| grid.first_column_text(index) == title)?;

    let header_row = title_row + 1;
    let data_start = title_row + 2;
    let end_exclusive =
        next_sentinel_row(grid, grid.rows_from(data_start)).unwrap_or(grid.row_count());

    let rows: Vec<TableRow> = grid
        .rows_from(data_start)
        .take_while(|(index, _)| *index < end_exclusive)
        .filter(|(index, _)| !grid.is_blank_row(*index))
        .map(|(grid_row, cells)| TableRow {
            grid_row,
            cells: cells.to_vec(),
        })
        .collect();

    tracing::debug!(
        title = %title,
        title_row,
        rows = rows.len(),
        "Located month table"
    );

    Some(LabeledTable {
        title_row,
        columns: header_labels(grid, header_row),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    fn chain_grid() -> Grid {
        Grid::new(vec![
            row(&["Month", "Volume"]),
            row(&["MAR 26", "10"]),
            row(&["TOTALS", "10"]),
            row(&[" MAR 26 Calls ", ""]),
            row(&["Strike", "At Close"]),
            row(&["25,500", "12"]),
            row(&["", ""]),
            row(&["25,600", "0"]),
            row(&["TOTALS", "12"]),
            row(&["MAR 26 Puts", ""]),
            row(&["Strike", "At Close"]),
            row(&["No month data for this option type", ""]),
            row(&["JUN 26 Calls", ""]),
            row(&["Strike", "At Close"]),
            row(&["26,000", "4"]),
        ])
    }

    #[test]
    fn test_table_title() {
        assert_eq!(table_title("MAR 26", Side::Calls), "MAR 26 Calls");
        assert_eq!(table_title("MAR 26", Side::Puts), "MAR 26 Puts");
    }

    #[test]
    fn test_locates_table_and_drops_blank_rows() {
        let grid = chain_grid();
        let table = locate_month_table(&grid, "MAR 26", Side::Calls).unwrap();
        assert_eq!(table.title_row, 3);
        assert_eq!(table.columns, vec!["Strike".to_string(), "At Close".to_string()]);
        let grid_rows: Vec<usize> = table.rows.iter().map(|r| r.grid_row).collect();
        assert_eq!(grid_rows, vec![5, 7]);
        assert_eq!(table.rows[0].cell(0).text(), "25,500");
    }

    #[test]
    fn test_no_month_data_yields_empty_table() {
        let grid = chain_grid();
        let table = locate_month_table(&grid, "MAR 26", Side::Puts).unwrap();
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_table_without_sentinel_runs_to_end() {
        let grid = chain_grid();
        let table = locate_month_table(&grid, "JUN 26", Side::Calls).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].grid_row, 14);
    }

    #[test]
    fn test_missing_side_is_not_found() {
        let grid = chain_grid();
        assert!(locate_month_table(&grid, "JUN 26", Side::Puts).is_none());
        assert!(locate_month_table(&grid, "SEP 26", Side::Calls).is_none());
    }

    #[test]
    fn test_title_match_is_exact() {
        let grid = Grid::new(vec![row(&["MAR 26 calls"]), row(&["Strike"]), row(&["1"])]);
        assert!(locate_month_table(&grid, "MAR 26", Side::Calls).is_none());
    }

    #[test]
    fn test_title_on_last_row() {
        let grid = Grid::new(vec![row(&["x"]), row(&["MAR 26 Calls"])]);
        let table = locate_month_table(&grid, "MAR 26", Side::Calls).unwrap();
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}
