use crate::common::Row;

/// Marker of the totals row at the bottom of every bibliography table
pub const SENTINEL_MARKER: &str = "Gesamtpunkte";

/// A row is kept when it has cells and is not the totals row
pub fn is_valid_row(row: &[String]) -> bool {
    match row.first() {
        None => false,
        Some(first) => !first.contains(SENTINEL_MARKER),
    }
}

/// Drop empty and sentinel rows, keeping order
pub fn valid_rows(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().filter(|row| is_valid_row(row)).collect()
}
