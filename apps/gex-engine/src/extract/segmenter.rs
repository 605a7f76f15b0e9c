//! Coarse table segmentation.
//!
//! Broker exports stack many tables in one sheet. A table ends at a row
//! whose first column is exactly `TOTALS` or contains `No month data`; the
//! next table starts on the following row. The scan is a forward-only pass
//! over a [`RowCursor`] with the sentinel match as the only transition.

use crate::workbook::{Grid, RowCursor};

/// First-column text that closes a table.
pub const TOTALS_SENTINEL: &str = "TOTALS";

/// First-column substring that closes an empty table.
pub const NO_MONTH_DATA_SENTINEL: &str = "No month data";

/// True when trimmed first-column text marks a table boundary.
///
/// `TOTALS` is matched exactly and case-sensitively; `No month data` is a
/// case-sensitive substring match.
#[must_use]
pub fn is_sentinel(first_column: &str) -> bool {
    first_column == TOTALS_SENTINEL || first_column.contains(NO_MONTH_DATA_SENTINEL)
}

/// Index of the first sentinel row at or after the cursor, if any.
#[must_use]
pub fn next_sentinel_row(grid: &Grid, cursor: RowCursor<'_>) -> Option<usize> {
    cursor
        .map(|(index, _)| index)
        .find(|&index| is_sentinel(&grid.first_column_text(index)))
}

/// Inclusive row range of one logical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First row of the segment.
    pub start_row: usize,
    /// Last row of the segment (the sentinel row itself, if any).
    pub end_row: usize,
}

impl Segment {
    /// Number of rows covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Always false; segments cover at least one row.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Reading rows of an open segment.
    Scanning,
    /// A sentinel just closed a segment; the next row opens a new one.
    SegmentClosed,
    /// End of grid reached and any trailing segment emitted.
    Exhausted,
}

/// Iterator yielding the segments of a grid in order.
#[derive(Debug, Clone)]
pub struct TableSegmenter<'a> {
    grid: &'a Grid,
    cursor: RowCursor<'a>,
    segment_start: usize,
    state: ScanState,
}

impl<'a> TableSegmenter<'a> {
    /// Start a scan at row 0.
    #[must_use]
    pub const fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            cursor: grid.rows_from(0),
            segment_start: 0,
            state: ScanState::Scanning,
        }
    }

    /// Current scanner state.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }
}

impl Iterator for TableSegmenter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.state == ScanState::Exhausted {
            return None;
        }

        for (index, _) in self.cursor.by_ref() {
            self.state = ScanState::Scanning;
            if is_sentinel(&self.grid.first_column_text(index)) {
                let segment = Segment {
                    start_row: self.segment_start,
                    end_row: index,
                };
                self.segment_start = index + 1;
                self.state = ScanState::SegmentClosed;
                return Some(segment);
            }
        }

        self.state = ScanState::Exhausted;
        let row_count = self.grid.row_count();
        (self.segment_start < row_count).then(|| Segment {
            start_row: self.segment_start,
            end_row: row_count - 1,
        })
    }
}

/// Partition every row of the grid into segments.
///
/// An empty grid yields no segments.
#[must_use]
pub fn segment_table(grid: &Grid) -> Vec<Segment> {
    let segments: Vec<Segment> = TableSegmenter::new(grid).collect();
    tracing::debug!(count = segments.len(), "Segmented grid");
    segments
}
