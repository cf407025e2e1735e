pub mod language;
pub mod title;

pub use language::*;
pub use title::*;

use log::{error, info};

use crate::common::Row;
use crate::normalize::RAW_ROW_WIDTH;

/// Leading rows of a raw file that never hold data: the header and one
/// artifact row
pub const SKIPPED_LEADING_ROWS: usize = 2;

/// True when every row has exactly `expected` fields
pub fn is_consistent(rows: &[Row], expected: usize) -> bool {
    if let Some(row) = rows.iter().find(|row| row.len() != expected) {
        error!(
            "Wrong amount of elements. Expected - {}, actual - {}",
            expected,
            row.len()
        );
        return false;
    }
    info!("Right amount of elements found");
    true
}

/// Split title and pages, add language and title word count.
/// `row[0], row[1], title, pages, language, words, row[3..]`
pub fn clean_row(row: &[String], detector: &dyn LanguageDetector) -> Row {
    let (title, pages) = split_title_pages(&row[2]);
    let language = detect_language(detector, &title);
    let words = title_word_count(&title);

    let mut out = Vec::with_capacity(row.len() + 3);
    out.push(row[0].clone());
    out.push(row[1].clone());
    out.push(title);
    out.push(pages);
    out.push(language);
    out.push(words.to_string());
    out.extend(row[3..].iter().cloned());
    out
}

/// Clean a whole raw file. `None` when any row is not [`RAW_ROW_WIDTH`] wide,
/// in which case nothing may be written.
pub fn clean_rows(raw: &[Row], detector: &dyn LanguageDetector) -> Option<Vec<Row>> {
    if !is_consistent(raw, RAW_ROW_WIDTH) {
        return None;
    }
    Some(
        raw.iter()
            .skip(SKIPPED_LEADING_ROWS)
            .map(|row| clean_row(row, detector))
            .collect(),
    )
}
