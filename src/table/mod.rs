//! JSON to table export: load records, extract the requested fields, write
//! CSV or XLSX.

pub mod loader;

pub use loader::{load_records, records_from_value};

use crate::domain::RawRecord;
use crate::export::Table;
use crate::extract::{Field, extract};

/// Build a table with one column per field. Rows where every cell is empty
/// are left out; partially empty rows are kept.
pub fn build_table(records: &[RawRecord], fields: &[Field]) -> Table {
    let mut table = Table::new(fields.iter().map(Field::as_str));

    for record in records {
        let row: Vec<String> = fields.iter().map(|f| extract(record, f)).collect();
        if row.iter().any(|cell| !cell.is_empty()) {
            table.push(row);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{OutputFormat, write_table};
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_name_address_category() {
        let records =
            records_from_value(json!([{"name": "Dhaka College", "tags": {"addr:city": "Dhaka"}}]))
                .unwrap();
        let table = build_table(&records, &Field::parse_list("name,address,category"));

        assert_eq!(table.headers, vec!["name", "address", "category"]);
        assert_eq!(table.rows, vec![vec!["Dhaka College", "Dhaka", "college"]]);
    }

    #[test]
    fn test_empty_rows_suppressed() {
        let records = records_from_value(json!([
            {"tags": {"amenity": "school"}},
            {"name": "Named"},
            {"phone": "017"}
        ]))
        .unwrap();

        let table = build_table(&records, &Field::parse_list("name,address"));
        assert_eq!(table.rows, vec![vec!["Named", ""]]);

        // category never extracts to empty, so no row is suppressed
        let table = build_table(&records, &Field::parse_list("name,category"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_end_to_end_csv() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("nearby-institute.json");
        let output = dir.path().join("names.csv");
        std::fs::write(
            &input,
            r#"{"elements": [
                {"type": "node", "id": 1, "tags": {"name": "Shonir Akhra High School", "amenity": "school"}},
                {"type": "node", "id": 2, "tags": {}}
            ]}"#,
        )
        .unwrap();

        let records = load_records(&input).unwrap();
        let table = build_table(&records, &Field::parse_list("name,category"));
        write_table(&table, &output, OutputFormat::from_path(&output)).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let text = text.trim_start_matches('\u{feff}');
        assert_eq!(
            text,
            "name,category\r\nShonir Akhra High School,school\r\n,other\r\n"
        );
    }
}
