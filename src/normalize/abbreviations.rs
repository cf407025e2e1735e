use clap::ValueEnum;

use crate::common::Row;

/// Width of a raw bibliography row
pub const RAW_ROW_WIDTH: usize = 8;

/// Column holding the publication type code
pub const TYPE_COLUMN: usize = 3;

/// Language of the decoded publication type labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TargetLanguage {
    #[default]
    #[value(name = "DE")]
    German,
    #[value(name = "EN")]
    English,
}

/// Publication type codes used by the bibliography
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbbreviationCode {
    /// AU
    Article,
    /// MO
    Monograph,
    /// ZS
    Journal,
    /// SW
    CollectionContribution,
}

impl AbbreviationCode {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "AU" => Some(Self::Article),
            "MO" => Some(Self::Monograph),
            "ZS" => Some(Self::Journal),
            "SW" => Some(Self::CollectionContribution),
            _ => None,
        }
    }

    pub fn label(&self, lang: TargetLanguage) -> &'static str {
        match (self, lang) {
            (Self::Article, TargetLanguage::German) => "Aufsatz",
            (Self::Monograph, TargetLanguage::German) => "Monographie",
            (Self::Journal, TargetLanguage::German) => "Zeitschrift",
            (Self::CollectionContribution, TargetLanguage::German) => "Sammelwerksbeitrag",
            (Self::Article, TargetLanguage::English) => "Article",
            (Self::Monograph, TargetLanguage::English) => "Monograph",
            (Self::Journal, TargetLanguage::English) => "Journal",
            (Self::CollectionContribution, TargetLanguage::English) => "ContributionsToACollectiveWork",
        }
    }
}

/// Replace the type code of a raw row by its label; unknown codes stay.
/// Returns `None` for rows that are not exactly [`RAW_ROW_WIDTH`] wide.
pub fn decode_abbreviations(mut row: Row, lang: TargetLanguage) -> Option<Row> {
    if row.len() != RAW_ROW_WIDTH {
        return None;
    }
    if let Some(code) = AbbreviationCode::parse(&row[TYPE_COLUMN]) {
        row[TYPE_COLUMN] = code.label(lang).to_string();
    }
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_type(code: &str) -> Row {
        ["Informatik", "Doe, J.", "Title", code, "2016-01-01", "5", "1", "2016"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_decode_german() {
        let row = decode_abbreviations(row_with_type("AU"), TargetLanguage::German).unwrap();
        assert_eq!(row[TYPE_COLUMN], "Aufsatz");
        let row = decode_abbreviations(row_with_type("SW"), TargetLanguage::German).unwrap();
        assert_eq!(row[TYPE_COLUMN], "Sammelwerksbeitrag");
    }

    #[test]
    fn test_decode_english() {
        let row = decode_abbreviations(row_with_type("MO"), TargetLanguage::English).unwrap();
        assert_eq!(row[TYPE_COLUMN], "Monograph");
        let row = decode_abbreviations(row_with_type("ZS"), TargetLanguage::English).unwrap();
        assert_eq!(row[TYPE_COLUMN], "Journal");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        let row = decode_abbreviations(row_with_type("XY"), TargetLanguage::German).unwrap();
        assert_eq!(row[TYPE_COLUMN], "XY");
        assert_eq!(row, row_with_type("XY"));
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let mut short = row_with_type("AU");
        short.pop();
        assert!(decode_abbreviations(short, TargetLanguage::German).is_none());

        let mut long = row_with_type("AU");
        long.push("extra".to_string());
        assert!(decode_abbreviations(long, TargetLanguage::German).is_none());
    }
}
