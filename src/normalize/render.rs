use log::warn;

use super::{decode_abbreviations, TargetLanguage};
use crate::common::Row;

/// Field delimiter of the bibliography CSV dialect
pub const DELIMITER: &str = "\",\"";

/// Header of crawled bibliography CSV files. The leading space of the
/// seventh label is part of the format.
pub const RAW_HEADER: [&str; 8] = [
    "Fach",
    "Autor/in",
    "Titel",
    "Typ",
    "Meldetag",
    "Punktzahl",
    " ZahlOldenburgerAutoren",
    "Jahr",
];

/// Header of cleaned bibliography CSV files
pub const CLEAN_HEADER: [&str; 11] = [
    "Fach",
    "Autor/in",
    "Titel",
    "Seiten",
    "Sprache",
    "ZahlWoerterTitel",
    "Typ",
    "Meldetag",
    "Punktzahl",
    "ZahlOldenburgerAutoren",
    "Jahr",
];

/// One CSV line: every field wrapped in double quotes, embedded double quotes
/// removed (not escaped), terminated by `\n`
pub fn quote_line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cleaned: Vec<String> = fields
        .into_iter()
        .map(|field| field.as_ref().replace('"', ""))
        .collect();
    format!("\"{}\"\n", cleaned.join(DELIMITER))
}

/// Header line plus one line per row whose width equals the header's.
/// Rows of any other width are dropped with a warning.
pub fn render_table<H: AsRef<str>>(header: &[H], rows: &[Row]) -> String {
    let mut out = quote_line(header.iter().map(|h| h.as_ref()));
    for row in rows {
        if row.len() == header.len() {
            out.push_str(&quote_line(row));
        } else {
            warn!(
                "Length of rows are not equal. Expected - {}, actual {}",
                header.len(),
                row.len()
            );
        }
    }
    out
}

/// Raw bibliography rows rendered with [`RAW_HEADER`] and decoded type codes
pub fn render_csv(rows: &[Row], lang: TargetLanguage) -> String {
    let decoded: Vec<Row> = rows
        .iter()
        .filter_map(|row| decode_abbreviations(row.clone(), lang))
        .collect();
    let dropped = rows.len() - decoded.len();
    if dropped > 0 {
        warn!("Dropped {} rows not {} cells wide", dropped, RAW_HEADER.len());
    }
    render_table(&RAW_HEADER, &decoded)
}

/// Rows joined verbatim: no header, no width check, quotes kept
pub fn render_verbatim(rows: &[Row]) -> String {
    rows.iter()
        .map(|row| format!("\"{}\"\n", row.join(DELIMITER)))
        .collect()
}
