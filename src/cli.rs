use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::citations::SourceTag;
use crate::common::{
    PipelineConfig, DEFAULT_CITATIONS_DIR, DEFAULT_LOGS_DIR, DEFAULT_PLOTS_DIR, DEFAULT_WORK_DIR,
};
use crate::normalize::TargetLanguage;

#[derive(Parser)]
#[command(name = "uolbib")]
#[command(about = "Crawl, clean and citation-enrich the Hochschulbibliografie (University Publication Bibliography) of UOL")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl bibliography pages listed in a URL file into CSV files
    Crawl(CrawlArgs),

    /// Split titles and pages, detect title language and count title words
    Clean(CleanArgs),

    /// Collect citation counts per title (CRAWL) or join them into the CSV (MERGE)
    Cite(CiteArgs),

    /// Aggregate a finalized CSV into summary tables
    Summarize(SummarizeArgs),
}

/// Directory overrides shared by all commands
#[derive(Args, Clone, Debug)]
pub struct DirArgs {
    /// Directory for crawled CSV files
    #[arg(long, default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// Directory holding the citation store
    #[arg(long, default_value = DEFAULT_CITATIONS_DIR)]
    pub citations_dir: PathBuf,

    /// Directory for summary tables
    #[arg(long, default_value = DEFAULT_PLOTS_DIR)]
    pub plots_dir: PathBuf,

    /// Directory for the log file
    #[arg(long, default_value = DEFAULT_LOGS_DIR)]
    pub logs_dir: PathBuf,
}

impl DirArgs {
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            work_dir: self.work_dir.clone(),
            citations_dir: self.citations_dir.clone(),
            plots_dir: self.plots_dir.clone(),
            logs_dir: self.logs_dir.clone(),
            ..PipelineConfig::default()
        }
    }
}

#[derive(Parser, Clone)]
pub struct CrawlArgs {
    /// File with one URL per line; '#' lines and non-http lines are ignored
    #[arg(long, default_value = "uolbibliography-test.txt")]
    pub urlfile: PathBuf,

    /// Also write all crawled rows into one merged CSV
    #[arg(long, default_value = "false")]
    pub mergedata: bool,

    /// Language of the decoded publication types
    #[arg(long, value_enum, default_value = "DE")]
    pub lang: TargetLanguage,

    /// Page listing graduated PhDs, extracted into its own CSV
    #[arg(long)]
    pub graduated_url: Option<String>,

    /// Pause after each page, in seconds
    #[arg(long, default_value = "4")]
    pub delay_secs: u64,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,

    #[command(flatten)]
    pub dirs: DirArgs,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

impl CrawlArgs {
    pub fn config(&self) -> PipelineConfig {
        let mut config = self.dirs.to_config();
        config.fetch_delay = Duration::from_secs(self.delay_secs);
        config.request_timeout = Duration::from_secs(self.timeout);
        config
    }
}

#[derive(Parser, Clone)]
pub struct CleanArgs {
    /// Input with raw crawled data in CSV
    #[arg(short, long, default_value = "uolbibliography-merged.csv")]
    pub input: PathBuf,

    /// Output with cleaned data in CSV
    #[arg(short, long, default_value = "uolbibliography-clean.csv")]
    pub output: PathBuf,

    #[command(flatten)]
    pub dirs: DirArgs,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct CiteArgs {
    /// Input with cleaned and unique data in CSV
    #[arg(short, long, default_value = "uolbibliography-merged-cleaned-unique.csv")]
    pub input: PathBuf,

    /// CRAWL collects citations into the store, MERGE joins them into a CSV
    #[arg(short, long, default_value = "CRAWL")]
    pub action: String,

    /// Output CSV of the MERGE action
    #[arg(short, long, default_value = "uolbibliography-citations.csv")]
    pub output: PathBuf,

    /// Citation sources to query
    #[arg(long, value_enum, value_delimiter = ',', default_value = "gs,cr")]
    pub sources: Vec<SourceTag>,

    /// Proxy for search engine queries (repeatable); one is picked per query
    #[arg(long = "proxy")]
    pub proxies: Vec<String>,

    /// Contact address sent to Crossref
    #[arg(long)]
    pub mailto: Option<String>,

    /// Checkpoint after this many search engine queries
    #[arg(long, default_value = "5")]
    pub scholar_every: usize,

    /// Checkpoint after this many Crossref queries
    #[arg(long, default_value = "15")]
    pub crossref_every: usize,

    /// Timeout in seconds per request
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,

    #[command(flatten)]
    pub dirs: DirArgs,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

impl CiteArgs {
    pub fn config(&self) -> PipelineConfig {
        let mut config = self.dirs.to_config();
        config.request_timeout = Duration::from_secs(self.timeout);
        config.checkpoint.scholar_every = self.scholar_every;
        config.checkpoint.crossref_every = self.crossref_every;
        config
    }
}

#[derive(Parser, Clone)]
pub struct SummarizeArgs {
    /// Input with cleaned and unique data in CSV
    #[arg(short, long, default_value = "uolbibliography-merged-cleaned-unique.csv")]
    pub input: PathBuf,

    /// Number of authors in the top-authors table
    #[arg(long, default_value = "30")]
    pub top_authors: usize,

    #[command(flatten)]
    pub dirs: DirArgs,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
