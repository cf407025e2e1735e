use super::{CitationStore, SourceTag, TITLE_COLUMN};
use crate::common::{MergeStats, Row};

/// Written when a source has no value for a title
pub const MISSING_CITATIONS: &str = "-1";

/// Columns appended by the merge, in this order
pub const MERGED_SOURCES: [SourceTag; 2] = [SourceTag::Scholar, SourceTag::Crossref];

pub const MERGED_COLUMN_LABELS: [&str; 2] = ["ZitationenGS", "ZitationenCR"];

/// Citation count of `title` from `source` as a CSV field
pub fn citation_field(store: &CitationStore, title: &str, source: SourceTag) -> String {
    store
        .value(title, source)
        .map(|count| count.to_string())
        .unwrap_or_else(|| MISSING_CITATIONS.to_string())
}

/// Input header followed by the citation column labels
pub fn merged_header(header: &[String]) -> Row {
    let mut out = header.to_vec();
    out.extend(MERGED_COLUMN_LABELS.iter().map(|label| label.to_string()));
    out
}

/// One output row per record, in input order, with the search-engine and
/// registry counts appended
pub fn merge_citations(records: &[Row], store: &CitationStore) -> (Vec<Row>, MergeStats) {
    let mut stats = MergeStats::default();
    let rows = records
        .iter()
        .map(|record| {
            let mut row = record.clone();
            let title = record.get(TITLE_COLUMN).map(String::as_str).unwrap_or("");
            if !store.contains(title) {
                stats.rows_without_citations += 1;
            }
            for source in MERGED_SOURCES {
                row.push(citation_field(store, title, source));
            }
            row
        })
        .collect::<Vec<Row>>();
    stats.rows_written = rows.len();
    (rows, stats)
}
