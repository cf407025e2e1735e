use anyhow::{bail, Context, Result};
use log::info;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::SummarizeArgs;
use crate::common::{ensure_dir, format_elapsed, setup_logging, Row, SummaryStats};
use crate::normalize::read_table;

pub const FIELD_COLUMN: &str = "Fach";
pub const YEAR_COLUMN: &str = "Jahr";
pub const AUTHOR_COLUMN: &str = "Autor/in";

pub const BY_FIELD_AND_YEAR_NAME: &str = "by-field-and-year.csv";
pub const TOP_AUTHORS_NAME: &str = "top-k-authors.csv";
pub const ARTICLES_PER_AUTHOR_NAME: &str = "articles-per-author.csv";

/// Template placeholders such as `%fach%` that survive in exported data
fn is_placeholder(cell: &str) -> bool {
    let cell = cell.trim();
    cell.len() >= 2 && cell.starts_with('%') && cell.ends_with('%')
}

fn column_index(header: &[String], name: &str) -> Result<usize> {
    match header.iter().position(|label| label.trim() == name) {
        Some(index) => Ok(index),
        None => bail!("Column '{}' not found in header", name),
    }
}

/// Publication counts aggregated from a bibliography table
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub by_field_and_year: BTreeMap<(String, String), usize>,
    pub per_author: BTreeMap<String, usize>,
    pub publications: usize,
}

impl Summary {
    pub fn from_table(header: &[String], rows: &[Row]) -> Result<Self> {
        let field = column_index(header, FIELD_COLUMN)?;
        let year = column_index(header, YEAR_COLUMN)?;
        let author = column_index(header, AUTHOR_COLUMN)?;

        let mut summary = Summary::default();
        for row in rows {
            let (Some(field_cell), Some(year_cell), Some(author_cell)) =
                (row.get(field), row.get(year), row.get(author))
            else {
                continue;
            };

            if !is_placeholder(field_cell) && !is_placeholder(year_cell) {
                *summary
                    .by_field_and_year
                    .entry((field_cell.clone(), year_cell.clone()))
                    .or_insert(0) += 1;
            }
            if !is_placeholder(author_cell) {
                *summary.per_author.entry(author_cell.clone()).or_insert(0) += 1;
                summary.publications += 1;
            }
        }
        Ok(summary)
    }

    pub fn fields(&self) -> BTreeSet<&str> {
        self.by_field_and_year.keys().map(|(field, _)| field.as_str()).collect()
    }

    /// Authors with the most publications; ties ordered by name
    pub fn top_authors(&self, k: usize) -> Vec<(&str, usize)> {
        let mut authors: Vec<(&str, usize)> = self
            .per_author
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        authors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        authors.truncate(k);
        authors
    }

    /// Number of authors per publication count
    pub fn articles_per_author(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for count in self.per_author.values() {
            *histogram.entry(*count).or_insert(0) += 1;
        }
        histogram
    }

    pub fn average_per_author(&self) -> f64 {
        if self.per_author.is_empty() {
            0.0
        } else {
            self.publications as f64 / self.per_author.len() as f64
        }
    }
}

fn write_table<I, R>(path: &Path, header: &[&str], records: I) -> Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(header)?;
    for record in records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the three summary tables into `dir`
pub fn write_summary(summary: &Summary, dir: &Path, top_k: usize) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;

    let by_field = dir.join(BY_FIELD_AND_YEAR_NAME);
    write_table(
        &by_field,
        &[FIELD_COLUMN, YEAR_COLUMN, "Publikationen"],
        summary
            .by_field_and_year
            .iter()
            .map(|((field, year), count)| vec![field.clone(), year.clone(), count.to_string()]),
    )?;

    let top = dir.join(TOP_AUTHORS_NAME);
    write_table(
        &top,
        &[AUTHOR_COLUMN, "Publikationen"],
        summary
            .top_authors(top_k)
            .into_iter()
            .map(|(name, count)| vec![name.to_string(), count.to_string()]),
    )?;

    let histogram = dir.join(ARTICLES_PER_AUTHOR_NAME);
    write_table(
        &histogram,
        &["Publikationen", "Autoren"],
        summary
            .articles_per_author()
            .into_iter()
            .map(|(publications, authors)| vec![publications.to_string(), authors.to_string()]),
    )?;

    Ok(vec![by_field, top, histogram])
}

pub fn run_summarize(args: SummarizeArgs) -> Result<SummaryStats> {
    let start_time = Instant::now();

    let config = args.dirs.to_config();
    setup_logging(&args.log_level, &config.logs_dir)?;

    info!("Summarizing {}", args.input.display());
    info!("Tables directory: {}", config.plots_dir.display());

    let (header, rows) = read_table(&args.input)?;
    let header = header.with_context(|| format!("{} is empty", args.input.display()))?;
    let summary = Summary::from_table(&header, &rows)?;

    let written = write_summary(&summary, &config.plots_dir, args.top_authors)?;

    let stats = SummaryStats {
        publications: summary.publications,
        fields: summary.fields().len(),
        authors: summary.per_author.len(),
        tables_written: written.len(),
    };

    info!("Total authors: {}", stats.authors);
    info!(
        "There are authors: {}; publications (not unique): {}; average: {:.2}",
        stats.authors,
        stats.publications,
        summary.average_per_author()
    );
    info!("Fields: {}", stats.fields);
    for path in &written {
        info!("  wrote {}", path.display());
    }
    info!("Done in {}", format_elapsed(start_time.elapsed()));

    Ok(stats)
}
