use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

use crate::common::Row;

/// Read every row of a bibliography CSV file, header included.
/// Rows may differ in width; schema checks belong to the caller.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read row {} of {}", index + 1, path.display()))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

/// Header row and data rows of a CSV file; an empty file yields no header
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<(Option<Row>, Vec<Row>)> {
    let mut rows = read_rows(path)?;
    if rows.is_empty() {
        return Ok((None, rows));
    }
    let header = rows.remove(0);
    Ok((Some(header), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{render_csv, TargetLanguage};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_rendered_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bib.csv");
        let rows: Vec<Row> = vec![vec![
            "Informatik", "Doe, J.", "On \"Quotes\"", "AU", "2016-01-01", "5", "1", "2016",
        ]
        .into_iter()
        .map(String::from)
        .collect()];
        fs::write(&path, render_csv(&rows, TargetLanguage::German)).unwrap();

        let (header, data) = read_table(&path).unwrap();
        assert_eq!(header.unwrap()[6], " ZahlOldenburgerAutoren");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0][1], "Doe, J.");
        assert_eq!(data[0][2], "On Quotes");
        assert_eq!(data[0][3], "Aufsatz");
    }

    #[test]
    fn test_read_rows_tolerates_mixed_widths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.csv");
        fs::write(&path, "\"a\",\"b\",\"c\"\n\"d\",\"e\"\n").unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_read_table_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();

        let (header, data) = read_table(&path).unwrap();
        assert!(header.is_none());
        assert!(data.is_empty());
    }
}
