//! Schema-less CSV tables.
//!
//! Widget data files are passed through to the frontend row by row without
//! a fixed schema. Each row becomes a JSON object keyed by header; cell
//! types are inferred so that numbers serialize as numbers and blank cells
//! as `null`.

use std::path::Path;

use serde_json::{Map, Value};

use crate::{DatasetError, log_degraded, open_reader};

/// Reads every row of the CSV file at `path` as a JSON object.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file is missing or unreadable.
pub fn read_table(path: &Path) -> Result<Vec<Map<String, Value>>, DatasetError> {
    let mut reader = open_reader(path)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::from_csv(path, e))?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::trace!("  skipping malformed row: {e}");
                continue;
            }
        };

        let mut map = Map::new();
        for (i, header) in headers.iter().enumerate() {
            map.insert(header.clone(), infer_cell(record.get(i).unwrap_or("")));
        }
        rows.push(map);
    }

    Ok(rows)
}

/// Like [`read_table`], but logs failures and returns an empty table.
#[must_use]
pub fn read_table_or_empty(path: &Path) -> Vec<Map<String, Value>> {
    read_table(path).unwrap_or_else(|e| {
        log_degraded(&e);
        Vec::new()
    })
}

fn infer_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = cell.parse::<f64>() {
        // NaN and infinities have no JSON representation
        return if f.is_finite() {
            Value::from(f)
        } else {
            Value::Null
        };
    }
    Value::String(cell.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_csv;

    #[test]
    fn infers_cell_types() {
        assert_eq!(infer_cell(""), Value::Null);
        assert_eq!(infer_cell("42"), serde_json::json!(42));
        assert_eq!(infer_cell("1.5"), serde_json::json!(1.5));
        assert_eq!(infer_cell("NaN"), Value::Null);
        assert_eq!(infer_cell("2024-25"), serde_json::json!("2024-25"));
    }

    #[test]
    fn reads_rows_as_objects() {
        let path = write_csv("date,rate,note\n2025-01-29,1.24,\n2025-01-30,0.98,재방\n");
        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], serde_json::json!("2025-01-29"));
        assert_eq!(rows[0]["rate"], serde_json::json!(1.24));
        assert_eq!(rows[0]["note"], Value::Null);
        assert_eq!(rows[1]["note"], serde_json::json!("재방"));
    }

    #[test]
    fn short_rows_fill_with_null() {
        let path = write_csv("a,b,c\n1,2\n");
        let rows = read_table(&path).unwrap();
        assert_eq!(rows[0]["c"], Value::Null);
    }

    #[test]
    fn missing_table_degrades_to_empty() {
        let path = std::env::temp_dir().join("vleague-missing-table.csv");
        assert!(read_table_or_empty(&path).is_empty());
    }
}
