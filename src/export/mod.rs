pub mod csv;
pub mod json;
pub mod xlsx;

pub use self::csv::write_csv;
pub use self::json::write_json;
pub use self::xlsx::write_xlsx;

use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

use crate::domain::CanonicalRecord;
use crate::error::ExportError;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    Xlsx,
}

impl OutputFormat {
    /// Infer from the file extension: `.json`, `.xlsx`, anything else is CSV
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => OutputFormat::Json,
            Some("xlsx") => OutputFormat::Xlsx,
            _ => OutputFormat::Csv,
        }
    }

    /// Format for the scraper's output file. A `.json` file name always
    /// gets JSON; otherwise an explicit format wins over the extension.
    pub fn for_output(explicit: Option<OutputFormat>, path: &Path) -> Self {
        let inferred = OutputFormat::from_path(path);
        if inferred == OutputFormat::Json {
            return OutputFormat::Json;
        }
        explicit.unwrap_or(inferred)
    }
}

/// Header row plus string rows, ready for CSV or XLSX
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Write a table as CSV or XLSX. JSON has no tabular form here.
pub fn write_table(table: &Table, path: &Path, format: OutputFormat) -> Result<(), ExportError> {
    match format {
        OutputFormat::Xlsx => write_xlsx(table, path),
        OutputFormat::Csv | OutputFormat::Json => write_csv(table, path),
    }
}

/// Write scraper results: full records as JSON, or the
/// [`CanonicalRecord::COLUMNS`] table as CSV/XLSX
pub fn save_records(
    records: &[CanonicalRecord],
    path: &Path,
    format: OutputFormat,
) -> Result<(), ExportError> {
    if format == OutputFormat::Json {
        return write_json(records, path);
    }

    let mut table = Table::new(CanonicalRecord::COLUMNS);
    for record in records {
        table.push(record.row());
    }
    write_table(&table, path, format)
}
