use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::citations::{
    merge_citations, merged_header, CitationEnricher, CitationSource, CitationStore,
    CrossrefSource, ScholarSource, SourceTag,
};
use crate::cli::CiteArgs;
use crate::common::{
    ensure_dir, format_elapsed, setup_logging, EnrichStats, MergeStats, PipelineConfig,
};
use crate::normalize::{read_table, render_table};

/// Actions accepted by `cite --action`
pub const CITE_ACTIONS: [&str; 2] = ["CRAWL", "MERGE"];

/// What a `cite` invocation did
#[derive(Debug)]
pub enum CiteOutcome {
    Enriched(EnrichStats),
    Merged(MergeStats),
    /// The action was not in [`CITE_ACTIONS`]; nothing was done
    InvalidAction(String),
}

/// Citation sources for `tags`, in the given order
fn build_sources(args: &CiteArgs, config: &PipelineConfig) -> Result<Vec<Box<dyn CitationSource>>> {
    let mut sources: Vec<Box<dyn CitationSource>> = Vec::new();
    for tag in &args.sources {
        if sources.iter().any(|source| source.tag() == *tag) {
            continue;
        }
        match tag {
            SourceTag::Scholar => sources.push(Box::new(
                ScholarSource::new(&config.user_agent, config.request_timeout, &args.proxies)
                    .context("Failed to create search engine client")?,
            )),
            SourceTag::Crossref => sources.push(Box::new(
                CrossrefSource::new(config.request_timeout, args.mailto.clone())
                    .context("Failed to create Crossref client")?,
            )),
        }
    }
    Ok(sources)
}

/// Query citations for every data row of `input` and persist them
pub fn enrich_file(input: &Path, store_path: &Path, enricher: &mut CitationEnricher) -> Result<EnrichStats> {
    let (_, records) = read_table(input)?;
    info!("Read {} records from {}", records.len(), input.display());

    let mut store = CitationStore::load(store_path)?;
    enricher.enrich(&records, &mut store)
}

/// Append citation columns from the store to every row of `input`
pub fn merge_file(input: &Path, store_path: &Path, output: &Path) -> Result<MergeStats> {
    let (header, records) = read_table(input)?;
    let header = header.with_context(|| format!("{} is empty", input.display()))?;
    let store = CitationStore::load(store_path)?;
    if store.is_empty() {
        warn!("Citation store {} holds no titles", store_path.display());
    }

    let (rows, stats) = merge_citations(&records, &store);
    let header = merged_header(&header);
    fs::write(output, render_table(&header, &rows))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(stats)
}

/// Summary of a finished `cite` invocation
fn report(outcome: &CiteOutcome) {
    match outcome {
        CiteOutcome::InvalidAction(action) => println!(
            "Unknown action '{}'. Allowed actions: {}",
            action,
            CITE_ACTIONS.join(", ")
        ),
        CiteOutcome::Merged(stats) => {
            info!("Rows written: {}", stats.rows_written);
            if stats.rows_without_citations > 0 {
                warn!("Rows without any citation entry: {}", stats.rows_without_citations);
            }
        }
        CiteOutcome::Enriched(stats) => {
            info!("Records seen: {}", stats.records_seen);
            info!("Titles created: {}", stats.titles_created);
            info!("Titles already complete: {}", stats.titles_complete);
            if stats.records_skipped_malformed > 0 {
                warn!("Rows skipped as malformed: {}", stats.records_skipped_malformed);
            }
            info!("Queries sent: {}", stats.total_queries());
            for tag in stats.queries.keys() {
                info!(
                    "  {} queries: {} ({} failed)",
                    tag,
                    stats.queries_for(*tag),
                    stats.failures.get(tag).copied().unwrap_or(0)
                );
            }
            info!("Checkpoints: {}", stats.checkpoints);
        }
    }
}

pub fn run_cite(args: CiteArgs) -> Result<CiteOutcome> {
    if !CITE_ACTIONS.contains(&args.action.as_str()) {
        let outcome = CiteOutcome::InvalidAction(args.action);
        report(&outcome);
        return Ok(outcome);
    }

    let start_time = Instant::now();

    let config = args.config();
    setup_logging(&args.log_level, &config.logs_dir)?;

    let store_path = config.store_path();

    info!("Starting citation {}", args.action.to_lowercase());
    info!("Input: {}", args.input.display());
    info!("Citation store: {}", store_path.display());

    let outcome = if args.action == "MERGE" {
        info!("Output: {}", args.output.display());
        CiteOutcome::Merged(merge_file(&args.input, &store_path, &args.output)?)
    } else {
        ensure_dir(&config.citations_dir)?;
        let sources = build_sources(&args, &config)?;
        let mut enricher = CitationEnricher::new(sources, config.checkpoint.clone(), store_path.clone());
        info!("Sources: {:?}", enricher.source_tags());

        CiteOutcome::Enriched(enrich_file(&args.input, &store_path, &mut enricher)?)
    };

    report(&outcome);
    info!("Done in {}", format_elapsed(start_time.elapsed()));

    Ok(outcome)
}
