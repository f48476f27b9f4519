use std::fs;
use std::path::Path;

use super::Table;
use crate::error::ExportError;

/// UTF-8 byte-order mark so spreadsheet apps detect the encoding of Bangla text
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize a table to CSV bytes: BOM, header row, then data rows (CRLF)
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = ::csv::WriterBuilder::new()
            .flexible(true)
            .terminator(::csv::Terminator::CRLF)
            .from_writer(&mut buf);
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Write a table as CSV. The file is only created once serialization succeeded.
pub fn write_csv(table: &Table, path: &Path) -> Result<(), ExportError> {
    let bytes = to_csv_bytes(table)?;
    fs::write(path, bytes)?;
    Ok(())
}
