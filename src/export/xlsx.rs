use std::path::Path;

use super::Table;
use crate::error::ExportError;

pub const SHEET_NAME: &str = "Results";

/// Write a table to a single-sheet workbook: header row, then data rows.
/// The file is only created once the workbook was built in memory.
#[cfg(feature = "xlsx")]
pub fn write_xlsx(table: &Table, path: &Path) -> Result<(), ExportError> {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let all_rows = std::iter::once(&table.headers).chain(table.rows.iter());
    for (row_idx, row) in all_rows.enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            // rust_xlsxwriter uses 0-based row/col as u32/u16
            worksheet.write_string(row_idx as u32, col_idx as u16, cell)?;
        }
    }

    let bytes = workbook.save_to_buffer()?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Built without the `xlsx` feature: nothing is written.
#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx(_table: &Table, _path: &Path) -> Result<(), ExportError> {
    Err(ExportError::XlsxUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_write_xlsx() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.xlsx");
        let mut table = Table::new(["name", "category"]);
        table.push(vec!["Dhaka College".to_string(), "college".to_string()]);

        write_xlsx(&table, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert!(bytes.starts_with(b"PK"));
    }

    #[cfg(not(feature = "xlsx"))]
    #[test]
    fn test_xlsx_unavailable_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("names.xlsx");

        let err = write_xlsx(&Table::new(["name"]), &path).unwrap_err();
        assert!(matches!(err, ExportError::XlsxUnavailable));
        assert!(!path.exists());
    }
}
