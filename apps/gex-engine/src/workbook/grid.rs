//! Untyped 2-D cell grid.
//!
//! A grid is the raw first worksheet of a workbook: row-major, 0-indexed,
//! no header row assumed. Rows may be ragged; reads past the end of a row
//! yield [`Cell::Empty`].

use std::fmt;

/// A single untyped spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No value.
    #[default]
    Empty,
    /// Text value, stored untrimmed.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Trimmed text rendering; empty cells normalize to `""`.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }

    /// True for [`Cell::Empty`] and whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// Immutable row-major grid of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid from rows.
    #[must_use]
    pub const fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one row; out-of-range rows are empty.
    #[must_use]
    pub fn row(&self, index: usize) -> &[Cell] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or_default()
    }

    /// One cell; anything out of range reads as [`Cell::Empty`].
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.row(row).get(column).unwrap_or(&EMPTY_CELL)
    }

    /// Trimmed text of the first column of `row`.
    #[must_use]
    pub fn first_column_text(&self, row: usize) -> String {
        self.cell(row, 0).text()
    }

    /// True when every cell of the row is blank.
    #[must_use]
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.row(row).iter().all(Cell::is_blank)
    }

    /// Forward-only cursor starting at `start`.
    #[must_use]
    pub const fn rows_from(&self, start: usize) -> RowCursor<'_> {
        RowCursor {
            grid: self,
            next: start,
        }
    }
}

/// Forward-only cursor over grid rows.
///
/// Cloning a cursor snapshots its position, so a scan can be restarted
/// from any point without re-walking the rows before it.
#[derive(Debug, Clone)]
pub struct RowCursor<'a> {
    grid: &'a Grid,
    next: usize,
}

impl RowCursor<'_> {
    /// Index of the row the next call to `next()` yields.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.next
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = (usize, &'a [Cell]);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        let row = self.grid.rows.get(index)?;
        self.next += 1;
        Some((index, row.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.row_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowCursor<'_> {}
