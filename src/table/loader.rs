use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::domain::RawRecord;

/// Keys that may hold the record list inside a top-level object, in lookup order
const LIST_KEYS: [&str; 3] = ["results", "elements", "items"];

/// Load records from a JSON file.
///
/// Accepts a bare array, an object carrying an array under one of
/// [`LIST_KEYS`], or any other object (taken as a single record).
/// Scalars yield no records.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let data: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;

    records_from_value(data)
}

pub fn records_from_value(data: Value) -> Result<Vec<RawRecord>> {
    let entries = match data {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let list_key = LIST_KEYS
                .iter()
                .find(|key| matches!(map.get(**key), Some(Value::Array(_))));
            match list_key.and_then(|key| map.remove(*key)) {
                Some(Value::Array(items)) => items,
                _ => vec![Value::Object(map)],
            }
        }
        _ => Vec::new(),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::debug!(index = idx, "skipping non-object JSON entry");
            continue;
        }
        let record: RawRecord = serde_json::from_value(entry)
            .with_context(|| format!("Failed to decode record #{}", idx))?;
        records.push(record);
    }

    Ok(records)
}
