use anyhow::{Context, Result};
use log::{error, info};
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use crate::cli::CrawlArgs;
use crate::common::{
    create_count_progress_bar, csv_target_path, ensure_dir, format_elapsed, setup_logging,
    short_token, CrawlStats, PipelineConfig, Row, GRADUATED_PHDS_NAME,
};
use crate::extract::{page_heading, rows_from_document, TableLocator};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::normalize::{render_csv, render_verbatim, valid_rows, TargetLanguage};

/// URLs of a URL list file: trimmed lines starting with "http", skipping
/// comments and blanks
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL file: {}", path.display()))?;
    Ok(parse_url_list(&text))
}

pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && line.starts_with("http"))
        .map(String::from)
        .collect()
}

/// Crawls bibliography pages one by one and writes a CSV per page
pub struct Crawler<'a> {
    fetcher: &'a dyn DocumentFetcher,
    config: &'a PipelineConfig,
    lang: TargetLanguage,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: &'a dyn DocumentFetcher, config: &'a PipelineConfig, lang: TargetLanguage) -> Self {
        Self { fetcher, config, lang }
    }

    /// Extract the publication table of one page into `<heading>.csv` in the
    /// work directory and return its valid rows
    pub fn process_bibliography_page(&self, html: &str) -> Result<(PathBuf, Vec<Row>)> {
        let document = Html::parse_document(html);

        let name = page_heading(&document).unwrap_or_else(short_token);
        let rows = rows_from_document(&document, &TableLocator::BIBLIOGRAPHY)?;
        let rows = valid_rows(rows);

        let target = csv_target_path(&self.config.work_dir, &name);
        fs::write(&target, render_csv(&rows, self.lang))
            .with_context(|| format!("Failed to write {}", target.display()))?;

        Ok((target, rows))
    }

    /// Fetch and process every URL. A page that fails is logged and skipped.
    pub fn crawl(&self, urls: &[String]) -> (Vec<Row>, CrawlStats) {
        let mut stats = CrawlStats {
            urls_listed: urls.len(),
            ..CrawlStats::default()
        };
        let mut data = Vec::new();

        let progress = create_count_progress_bar(urls.len() as u64);
        for url in urls {
            progress.inc(1);
            info!("Following URL is going to be parsed: {}", url);

            let outcome = self
                .fetcher
                .fetch(url)
                .map_err(anyhow::Error::from)
                .and_then(|html| self.process_bibliography_page(&html));

            match outcome {
                Ok((target, rows)) => {
                    info!("{} rows written to {}", rows.len(), target.display());
                    stats.urls_processed += 1;
                    stats.files_written += 1;
                    stats.rows_kept += rows.len();
                    data.extend(rows);
                    thread::sleep(self.config.fetch_delay);
                }
                Err(e) => {
                    error!("Skipping {}: {:#}", url, e);
                    stats.urls_failed += 1;
                }
            }
        }
        progress.finish_with_message("URLs processed");

        (data, stats)
    }

    /// Extract the graduated PhDs table verbatim into its own CSV
    pub fn process_graduated_phds(&self, url: &str) -> Result<PathBuf> {
        let html = self.fetcher.fetch(url)?;
        let document = Html::parse_document(&html);
        let rows = rows_from_document(&document, &TableLocator::GRADUATED_PHDS)?;

        let target = csv_target_path(&self.config.work_dir, GRADUATED_PHDS_NAME);
        fs::write(&target, render_verbatim(&rows))
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(target)
    }

    /// Write all crawled rows into the merged CSV
    pub fn write_merged(&self, data: &[Row]) -> Result<PathBuf> {
        let target = self.config.merged_csv_path();
        fs::write(&target, render_csv(data, self.lang))
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(target)
    }
}

pub fn run_crawl(args: CrawlArgs) -> Result<CrawlStats> {
    let start_time = Instant::now();

    let config = args.config();
    setup_logging(&args.log_level, &config.logs_dir)?;

    info!("Starting UOL bibliography crawler");
    info!("URL file: {}", args.urlfile.display());

    ensure_dir(&config.work_dir)?;
    info!("Files will be saved into folder \"{}\"", config.work_dir.display());

    let urls = read_url_file(&args.urlfile)?;
    info!("{} URLs will be processed", urls.len());

    let fetcher = HttpFetcher::new(&config).context("Failed to create HTTP client")?;
    let crawler = Crawler::new(&fetcher, &config, args.lang);

    let (data, mut stats) = crawler.crawl(&urls);

    if let Some(url) = &args.graduated_url {
        thread::sleep(config.fetch_delay);
        match crawler.process_graduated_phds(url) {
            Ok(target) => {
                info!("Graduated PhDs written to {}", target.display());
                stats.files_written += 1;
            }
            Err(e) => error!("Graduated PhDs page failed: {:#}", e),
        }
    }

    if args.mergedata {
        let target = crawler.write_merged(&data)?;
        info!("Merged data written to {}", target.display());
        stats.files_written += 1;
    }

    info!("");
    info!("==================== CRAWL COMPLETE ====================");
    info!("Total execution time: {}", format_elapsed(start_time.elapsed()));
    info!("  URLs listed: {}", stats.urls_listed);
    info!("  URLs processed: {}", stats.urls_processed);
    info!("  URLs failed: {}", stats.urls_failed);
    info!("  Rows kept: {}", stats.rows_kept);
    info!("  Files written: {}", stats.files_written);
    info!("========================================================");

    Ok(stats)
}
