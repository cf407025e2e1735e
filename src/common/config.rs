use std::path::PathBuf;
use std::time::Duration;

use crate::citations::SourceTag;

/// User agent sent with every page and search-engine request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; U; FreeBSD i386; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/51.0.2704.103 Safari/537.36";

pub const DEFAULT_WORK_DIR: &str = "__temp__";
pub const DEFAULT_CITATIONS_DIR: &str = "citations";
pub const DEFAULT_PLOTS_DIR: &str = "plots";
pub const DEFAULT_LOGS_DIR: &str = "logs";
pub const CITATIONS_DB_NAME: &str = "citations-db.json";
pub const MERGED_CSV_NAME: &str = "uolbibliography-merged.csv";
pub const GRADUATED_PHDS_NAME: &str = "cs-graduated-phds";

/// When the citation store is written to disk during an enrichment pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointPolicy {
    /// Checkpoint after this many search-engine queries
    pub scholar_every: usize,
    /// Checkpoint after this many registry queries
    pub crossref_every: usize,
    /// Lower bound (inclusive) of the pause before a checkpoint, in seconds
    pub sleep_min_secs: u64,
    /// Upper bound (exclusive) of the pause before a checkpoint, in seconds
    pub sleep_max_secs: u64,
}

impl CheckpointPolicy {
    pub fn interval_for(&self, tag: SourceTag) -> usize {
        match tag {
            SourceTag::Scholar => self.scholar_every,
            SourceTag::Crossref => self.crossref_every,
        }
    }

    /// Random pause in `[sleep_min_secs, sleep_max_secs)`
    pub fn pause(&self) -> Duration {
        let secs = if self.sleep_max_secs > self.sleep_min_secs {
            fastrand::u64(self.sleep_min_secs..self.sleep_max_secs)
        } else {
            self.sleep_min_secs
        };
        Duration::from_secs(secs)
    }
}

impl Default for CheckpointPolicy {
    fn default() -> Self {
        Self {
            scholar_every: 5,
            crossref_every: 15,
            sleep_min_secs: 2,
            sleep_max_secs: 7,
        }
    }
}

/// Process-wide settings shared by all stages
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub work_dir: PathBuf,
    pub citations_dir: PathBuf,
    pub plots_dir: PathBuf,
    /// Directory of the per-host log file
    pub logs_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Pause after each crawled page
    pub fetch_delay: Duration,
    pub checkpoint: CheckpointPolicy,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            citations_dir: PathBuf::from(DEFAULT_CITATIONS_DIR),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            fetch_delay: Duration::from_secs(4),
            checkpoint: CheckpointPolicy::default(),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.citations_dir.join(CITATIONS_DB_NAME)
    }

    pub fn merged_csv_path(&self) -> PathBuf {
        self.work_dir.join(MERGED_CSV_NAME)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
