//! Sample-row ingest for preview rendering.
//!
//! Rows arrive as CSV (first record is the header of source-field
//! identifiers) or as a JSON array of flat objects. JSON nulls mean the
//! field is absent for that row; other non-string scalars are rendered
//! with their JSON representation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use recmap_model::SampleRow;
use serde_json::Value;

/// Load sample rows from a CSV or JSON file, dispatching on extension.
pub fn load_rows(path: &Path) -> Result<Vec<SampleRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => bail!(
            "unsupported sample-row file '{}': expected .csv or .json",
            path.display()
        ),
    }
}

fn load_csv(path: &Path) -> Result<Vec<SampleRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = SampleRow::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header, value);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn load_json(path: &Path) -> Result<Vec<SampleRow>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: Vec<serde_json::Map<String, Value>> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of objects", path.display()))?;
    let mut rows = Vec::new();
    for object in parsed {
        let mut row = SampleRow::new();
        for (field, value) in object {
            match value {
                Value::Null => {}
                Value::String(s) => row.insert(field, s),
                other => row.insert(field, other.to_string()),
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("recmap-rows-{name}"));
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn csv_rows_use_header_names() {
        let path = write_temp("basic.csv", "acct,loc\n123,45\n678,\n");
        let rows = load_rows(&path).expect("load csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("acct"), Some("123"));
        assert_eq!(rows[1].get("loc"), Some(""));
    }

    #[test]
    fn json_nulls_are_absent_fields() {
        let path = write_temp(
            "basic.json",
            r#"[{"acct":"123","loc":null,"balance":42.5}]"#,
        );
        let rows = load_rows(&path).expect("load json");
        assert_eq!(rows[0].get("acct"), Some("123"));
        assert_eq!(rows[0].get("loc"), None);
        assert_eq!(rows[0].get("balance"), Some("42.5"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = write_temp("rows.txt", "acct\n1\n");
        assert!(load_rows(&path).is_err());
    }
}
