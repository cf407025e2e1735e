use anyhow::{Context, Result};
use gethostname::gethostname;
use log::{LevelFilter, Log, Metadata, Record};
use simple_logger::SimpleLogger;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use time::macros::format_description;

use super::paths::ensure_dir;

/// Parse a log level string into a LevelFilter
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_uppercase().as_str() {
        "DEBUG" => LevelFilter::Debug,
        "INFO" => LevelFilter::Info,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "ERROR" => LevelFilter::Error,
        "OFF" => LevelFilter::Off,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to INFO.", level);
            LevelFilter::Info
        }
    }
}

/// Log file of this host inside `logs_dir`: `<hostname>-root.log`
pub fn log_file_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(format!("{}-root.log", gethostname().to_string_lossy()))
}

/// Sends every record to the console and to the log file
struct TeeLogger {
    console: SimpleLogger,
    file: Box<WriteLogger<File>>,
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata) || self.file.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.console.log(record);
        self.file.log(record);
    }

    fn flush(&self) {
        self.console.flush();
        self.file.flush();
    }
}

/// Set up logging with the specified level, to the console and appended to
/// [`log_file_path`] in `logs_dir` (created if missing).
///
/// Only the first call installs the logger; later calls adjust the maximum
/// level so that stages invoked from one another keep a single sink.
pub fn setup_logging(log_level: &str, logs_dir: &Path) -> Result<()> {
    let level = parse_log_level(log_level);

    ensure_dir(logs_dir)?;
    let path = log_file_path(logs_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let console = SimpleLogger::new()
        .with_level(level)
        .with_timestamp_format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"));
    let file_config = ConfigBuilder::new()
        .set_time_format_custom(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .build();
    let file = WriteLogger::new(level, file_config, file);

    if log::set_boxed_logger(Box::new(TeeLogger { console, file })).is_err() {
        log::debug!("Logger already installed, adjusting level only");
    }
    log::set_max_level(level);
    Ok(())
}
