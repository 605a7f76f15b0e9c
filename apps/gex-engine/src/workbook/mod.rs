//! Workbook input: the untyped grid model and the loaders that produce it.

pub mod grid;
pub mod loader;

pub use grid::{Cell, Grid, RowCursor};
pub use loader::{CsvGridLoader, GridLoader, WorkbookLoader, load_grid};
