use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::ExportError;

/// Pretty-print `items` as a JSON array (2-space indent, UTF-8, non-ASCII kept)
pub fn write_json<T: Serialize>(items: &[T], path: &Path) -> Result<(), ExportError> {
    let bytes = serde_json::to_vec_pretty(items)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::tempdir;

    #[test]
    fn test_write_json_keeps_non_ascii() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let items = vec![json!({"name": "\u{09AE}\u{09BE}\u{09A6}\u{09CD}\u{09B0}\u{09BE}\u{09B8}\u{09BE}"})];

        write_json(&items, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\u{09AE}\u{09BE}\u{09A6}"));
        assert!(text.starts_with("[\n  {\n    \"name\""));
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, Value::Array(items));
    }
}
