use std::collections::BTreeMap;

use crate::citations::SourceTag;

/// One table row as ordered cell texts
pub type Row = Vec<String>;

/// Statistics from the crawl step
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    pub urls_listed: usize,
    pub urls_processed: usize,
    pub urls_failed: usize,
    pub rows_kept: usize,
    pub files_written: usize,
}

/// Statistics from the clean step
#[derive(Debug, Clone, Default)]
pub struct CleanStats {
    pub rows_read: usize,
    pub rows_written: usize,
    pub consistent: bool,
}

/// Statistics from one citation enrichment pass
#[derive(Debug, Clone, Default)]
pub struct EnrichStats {
    pub records_seen: usize,
    pub records_skipped_malformed: usize,
    pub titles_complete: usize,
    pub titles_created: usize,
    pub queries: BTreeMap<SourceTag, usize>,
    pub failures: BTreeMap<SourceTag, usize>,
    pub checkpoints: usize,
}

impl EnrichStats {
    pub fn total_queries(&self) -> usize {
        self.queries.values().sum()
    }

    pub fn queries_for(&self, tag: SourceTag) -> usize {
        self.queries.get(&tag).copied().unwrap_or(0)
    }
}

/// Statistics from the merge action
#[derive(Debug, Clone, Default)]
pub struct MergeStats {
    pub rows_written: usize,
    pub rows_without_citations: usize,
}

/// Statistics from the summarize step
#[derive(Debug, Clone, Default)]
pub struct SummaryStats {
    pub publications: usize,
    pub fields: usize,
    pub authors: usize,
    pub tables_written: usize,
}
