use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Characters allowed in generated output file names
const VALID_FILE_NAME_CHARS: &str =
    "-_.() abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Longest output path (in characters) before the extension is re-appended
pub const MAX_TARGET_PATH_CHARS: usize = 250;

/// Drop every character that is not file-name conform
pub fn sanitize_file_name(name: &str) -> String {
    name.chars().filter(|c| VALID_FILE_NAME_CHARS.contains(*c)).collect()
}

/// Random 8-hex-character token, used for backups and unnamed pages
pub fn short_token() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Path of the CSV written for one crawled page.
/// "dir" + "Name" -> "dir/Name.csv"; over-long paths are cut to
/// [`MAX_TARGET_PATH_CHARS`] characters and get ".csv" appended again.
pub fn csv_target_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    let target = dir.as_ref().join(format!("{}.csv", sanitize_file_name(name)));
    let as_text = target.to_string_lossy();
    if as_text.chars().count() > MAX_TARGET_PATH_CHARS {
        let cut: String = as_text.chars().take(MAX_TARGET_PATH_CHARS).collect();
        PathBuf::from(format!("{}.csv", cut))
    } else {
        target
    }
}

/// Sibling path used to keep the previous version of a file:
/// "citations-db.json" -> "citations-db.json-1a2b3c4d"
pub fn backup_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    PathBuf::from(format!("{}-{}", path.display(), short_token()))
}

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}
