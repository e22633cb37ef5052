use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

pub mod csv;
pub mod json;
pub mod report;

pub const NO_RESULT_MESSAGE: &str = "No result data available to export";

/// `<prefix>_<epoch-ms>.<ext>`, the naming every download has used.
pub fn default_file_name(prefix: &str, ext: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}_{}.{ext}", now.timestamp_millis())
}

/// Writes `contents` to `target`, or to `fallback_name` inside `exports_dir`.
pub async fn write_artifact(
    exports_dir: &Path,
    target: Option<&Path>,
    fallback_name: &str,
    contents: &str,
) -> Result<PathBuf> {
    let path = match target {
        Some(path) => path.to_path_buf(),
        None => exports_dir.join(fallback_name),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(target: "export", path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(path)
}
