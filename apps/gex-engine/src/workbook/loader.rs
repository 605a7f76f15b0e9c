//! Grid loaders.
//!
//! A loader turns a file path into a [`Grid`] of untyped cells taken from the
//! first worksheet, with no header row assumed.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;

use super::grid::{Cell, Grid};
use crate::error::{GexError, Result};

/// Produces a grid from a file path.
pub trait GridLoader {
    /// Load the first sheet of `path`.
    fn load(&self, path: &Path) -> Result<Grid>;
}

/// Spreadsheet loader (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookLoader;

impl GridLoader for WorkbookLoader {
    fn load(&self, path: &Path) -> Result<Grid> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| GexError::NoWorksheet(path.to_path_buf()))??;

        // Ranges start at the first used cell; pad back to sheet coordinates
        // so column 0 is always column A.
        let (row_offset, col_offset) = range
            .start()
            .map_or((0, 0), |(r, c)| (r as usize, c as usize));

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
        for data_row in range.rows() {
            let mut row = vec![Cell::Empty; col_offset];
            row.extend(data_row.iter().map(cell_from_data));
            rows.push(row);
        }

        tracing::debug!(
            path = %path.display(),
            rows = rows.len(),
            "Loaded worksheet"
        );
        Ok(Grid::new(rows))
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

/// Headerless CSV loader for sheets exported as comma-separated text.
///
/// Each physical line is one grid row, so blank lines stay in the grid as
/// empty rows and row indices match the source file. Quoted fields cannot
/// span lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvGridLoader;

impl GridLoader for CsvGridLoader {
    fn load(&self, path: &Path) -> Result<Grid> {
        let text = fs::read_to_string(path)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let mut builder = ReaderBuilder::new();
        builder.has_headers(false).flexible(true);

        let mut rows = Vec::new();
        for line in text.lines() {
            let mut reader = builder.from_reader(line.as_bytes());
            let row = match reader.records().next() {
                Some(record) => record?.iter().map(Cell::from).collect(),
                None => Vec::new(),
            };
            rows.push(row);
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded CSV grid");
        Ok(Grid::new(rows))
    }
}

/// Load a grid, picking the loader from the file extension.
///
/// A missing path fails with [`GexError::SourceNotFound`] before any
/// loader is invoked.
pub fn load_grid(path: &Path) -> Result<Grid> {
    if !path.exists() {
        return Err(GexError::source_not_found(path));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        CsvGridLoader.load(path)
    } else {
        WorkbookLoader.load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_source_is_reported() {
        let err = load_grid(Path::new("/definitely/not/here.xls")).unwrap_err();
        assert!(matches!(err, GexError::SourceNotFound { .. }));
    }

    #[test]
    fn test_csv_loader_keeps_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "MAR 26 Calls").unwrap();
        writeln!(file, "Strike,At Close").unwrap();
        writeln!(file, "\"25,600\",12").unwrap();
        writeln!(file, ",").unwrap();
        drop(file);

        let grid = load_grid(&path).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.row(0).len(), 1);
        assert_eq!(grid.first_column_text(0), "MAR 26 Calls");
        assert_eq!(grid.cell(2, 0), &Cell::Text("25,600".to_string()));
        assert!(grid.is_blank_row(3));
    }

    #[test]
    fn test_csv_loader_keeps_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.csv");
        std::fs::write(&path, "a\n\nb\r\n\r\n").unwrap();

        let grid = load_grid(&path).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert!(grid.row(1).is_empty());
        assert_eq!(grid.first_column_text(2), "b");
        assert!(grid.is_blank_row(3));
    }

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_workbook_keeps_sheet_coordinates() {
        // First used cell is B3; row 5 has no cells at all.
        let grid = load_grid(&fixture("offset_chain.xlsx")).unwrap();

        assert_eq!(grid.row_count(), 6);
        assert!(grid.is_blank_row(0));
        assert!(grid.is_blank_row(1));
        assert_eq!(grid.first_column_text(2), "");
        assert_eq!(grid.cell(2, 1), &Cell::Text("Month".to_string()));
        assert_eq!(grid.cell(3, 1), &Cell::Text("MAR 26".to_string()));
        assert_eq!(grid.cell(3, 2), &Cell::Number(7.0));
        assert!(grid.is_blank_row(4));
        assert_eq!(grid.cell(5, 1), &Cell::Text("TOTALS".to_string()));
    }

    #[test]
    fn test_workbook_reads_first_sheet_from_a1() {
        let grid = WorkbookLoader.load(&fixture("chain.xlsx")).unwrap();
        assert_eq!(grid.row_count(), 12);
        assert_eq!(grid.first_column_text(0), "NQ Options Chain");
        assert_eq!(grid.first_column_text(4), "JUN 26 Calls");
        assert_eq!(grid.cell(6, 0), &Cell::Number(100.0));
        assert_eq!(grid.cell(6, 1), &Cell::Number(10.0));
    }

    #[test]
    fn test_workbook_without_sheets() {
        let path = fixture("no_sheets.xlsx");
        let err = load_grid(&path).unwrap_err();
        assert!(matches!(err, GexError::NoWorksheet(ref p) if p == &path));
    }

    #[test]
    fn test_data_conversion() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Int(20)), Cell::Number(20.0));
        assert_eq!(cell_from_data(&Data::Float(0.5)), Cell::Number(0.5));
        assert_eq!(
            cell_from_data(&Data::String("TOTALS".into())),
            Cell::Text("TOTALS".to_string())
        );
    }
}
