use anyhow::Result;
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::thread;

use super::{CitationSource, CitationStore, CitationValue, SourceTag};
use crate::common::{create_count_progress_bar, CheckpointPolicy, EnrichStats, Row};

pub const AUTHOR_COLUMN: usize = 1;
pub const TITLE_COLUMN: usize = 2;

/// Fills the citation store with counts from the configured sources.
///
/// Per title: an unseen title gets an empty entry; only sources missing from
/// the entry are queried, each once; a title with every configured source
/// present is skipped without any request. Failed queries leave the source
/// missing so a later run picks it up again; a title repeated in the input
/// is not queried again for the same source within one pass.
pub struct CitationEnricher<'a> {
    sources: Vec<Box<dyn CitationSource + 'a>>,
    policy: CheckpointPolicy,
    store_path: PathBuf,
}

impl<'a> CitationEnricher<'a> {
    pub fn new(
        sources: Vec<Box<dyn CitationSource + 'a>>,
        policy: CheckpointPolicy,
        store_path: PathBuf,
    ) -> Self {
        Self {
            sources,
            policy,
            store_path,
        }
    }

    pub fn source_tags(&self) -> Vec<SourceTag> {
        self.sources.iter().map(|source| source.tag()).collect()
    }

    /// One pass over `records`, checkpointing as queries accumulate and
    /// persisting the store once more at the end
    pub fn enrich(&mut self, records: &[Row], store: &mut CitationStore) -> Result<EnrichStats> {
        let tags = self.source_tags();
        let mut stats = EnrichStats::default();
        let mut issued: BTreeMap<SourceTag, usize> = BTreeMap::new();
        // (title, source) pairs already queried in this pass, failed ones included
        let mut attempted: BTreeSet<(String, SourceTag)> = BTreeSet::new();

        let progress = create_count_progress_bar(records.len() as u64);

        for (index, record) in records.iter().enumerate() {
            progress.inc(1);
            stats.records_seen += 1;

            if record.len() <= TITLE_COLUMN {
                warn!("Skipping row {} with {} fields", index + 1, record.len());
                stats.records_skipped_malformed += 1;
                continue;
            }
            let author = &record[AUTHOR_COLUMN];
            let title = &record[TITLE_COLUMN];

            if !store.contains(title) {
                store.entry_mut(title);
                stats.titles_created += 1;
            }

            let missing = store.missing_sources(title, &tags);
            if missing.is_empty() {
                stats.titles_complete += 1;
                continue;
            }

            let mut advanced = Vec::new();
            for source in self.sources.iter_mut() {
                let tag = source.tag();
                if !missing.contains(&tag) {
                    continue;
                }
                if !attempted.insert((title.clone(), tag)) {
                    debug!("Already queried {} for '{}' in this pass", tag, title);
                    continue;
                }

                *issued.entry(tag).or_insert(0) += 1;
                *stats.queries.entry(tag).or_insert(0) += 1;
                advanced.push(tag);

                match source.citations(author, title) {
                    Ok(count) => store.insert(title, CitationValue::new(tag, count)),
                    Err(e) => {
                        *stats.failures.entry(tag).or_insert(0) += 1;
                        error!(
                            "Exception while getting number of citations ({}): {}. Title: {}",
                            tag, e, title
                        );
                    }
                }
            }

            let due = advanced.iter().any(|tag| {
                let every = self.policy.interval_for(*tag);
                every > 0 && issued[tag] % every == 0
            });
            if due {
                let pause = self.policy.pause();
                info!(
                    "Save intermediate results and sleep for {}s. Total processed so far: {}",
                    pause.as_secs(),
                    index
                );
                thread::sleep(pause);
                store.save(&self.store_path)?;
                stats.checkpoints += 1;
            }
        }

        progress.finish_with_message("Citation pass complete");
        store.save(&self.store_path)?;

        Ok(stats)
    }
}
