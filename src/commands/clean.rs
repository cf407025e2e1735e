use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::clean::{clean_rows, LanguageDetector, WhatlangDetector};
use crate::cli::CleanArgs;
use crate::common::{create_spinner, format_elapsed, setup_logging, CleanStats};
use crate::normalize::{read_rows, render_table, CLEAN_HEADER};

/// Clean `input` into `output`. An inconsistent input writes nothing.
pub fn clean_file(input: &Path, output: &Path, detector: &dyn LanguageDetector) -> Result<CleanStats> {
    let raw = read_rows(input)?;
    let mut stats = CleanStats {
        rows_read: raw.len(),
        ..CleanStats::default()
    };

    let spinner = create_spinner("Cleaning rows...");
    let cleaned = clean_rows(&raw, detector);
    spinner.finish_and_clear();

    match cleaned {
        Some(rows) => {
            fs::write(output, render_table(&CLEAN_HEADER, &rows))
                .with_context(|| format!("Failed to write {}", output.display()))?;
            stats.consistent = true;
            stats.rows_written = rows.len();
        }
        None => info!("Data are not consistent."),
    }

    Ok(stats)
}

pub fn run_clean(args: CleanArgs) -> Result<CleanStats> {
    let start_time = Instant::now();

    setup_logging(&args.log_level, &args.dirs.logs_dir)?;

    info!("Start with cleaning. Input {}", args.input.display());

    let stats = clean_file(&args.input, &args.output, &WhatlangDetector)?;

    info!("Rows read: {}", stats.rows_read);
    info!("Rows written: {}", stats.rows_written);
    info!("Done with cleaning in {}. Check {}", format_elapsed(start_time.elapsed()), args.output.display());

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct English;

    impl LanguageDetector for English {
        fn detect(&self, _text: &str) -> Option<String> {
            Some("English".to_string())
        }
    }

    const RAW: &str = concat!(
        "\"Fach\",\"Autor/in\",\"Titel\",\"Typ\",\"Meldetag\",\"Punktzahl\",\" ZahlOldenburgerAutoren\",\"Jahr\"\n",
        "\"%fach%\",\"%autor%\",\"%titel%\",\"%typ%\",\"%tag%\",\"%punkte%\",\"%zahl%\",\"%jahr%\"\n",
        "\"Informatik\",\"Doe, J.\",\"On Rust (42 S.)\",\"Aufsatz\",\"2016-01-01\",\"5\",\"1\",\"2016\"\n",
    );

    #[test]
    fn test_clean_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("clean.csv");
        fs::write(&input, RAW).unwrap();

        let stats = clean_file(&input, &output, &English).unwrap();
        assert!(stats.consistent);
        assert_eq!(stats.rows_written, 1);

        let csv = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "\"Informatik\",\"Doe, J.\",\"On Rust\",\"42\",\"English\",\"2\",\"Aufsatz\",\"2016-01-01\",\"5\",\"1\",\"2016\""
        );
    }

    #[test]
    fn test_inconsistent_file_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("clean.csv");
        fs::write(&input, format!("{}\"Informatik\",\"Doe\",\"Short\"\n", RAW)).unwrap();

        let stats = clean_file(&input, &output, &English).unwrap();
        assert!(!stats.consistent);
        assert_eq!(stats.rows_written, 0);
        assert!(!output.exists());
    }
}
