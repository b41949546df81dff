//! Saving CSV export downloads to disk.

use std::path::{Path, PathBuf};

use crate::error::Result;

pub const DEFAULT_EXPORT_FILENAME: &str = "participants.csv";

/// Extracts the quoted filename from a `Content-Disposition` header value,
/// e.g. `attachment; filename="robo_race_participants.csv"`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=\"")?;
    let (name, _) = rest.split_once('"')?;
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return None;
    }
    Some(name.to_string())
}

/// Writes a downloaded export under `dir` and returns the full path.
pub fn save_export(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
