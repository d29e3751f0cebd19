use crate::models::HotelCandidate;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory the winning records land in, relative to the working directory.
pub const OUTPUT_DIR: &str = "scraperResults";

/// Writes the winning candidate under `scraperResults/`, in a file named
/// after the current instant so repeated runs never overwrite each other.
pub async fn persist_best(candidate: &HotelCandidate) -> Result<PathBuf> {
    persist_best_in(Path::new(OUTPUT_DIR), candidate).await
}

pub async fn persist_best_in(dir: &Path, candidate: &HotelCandidate) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    // RFC 3339 instant with ':' and '.' swapped out for filename safety.
    let stamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let path = dir.join(format!("best-hotel-{stamp}.json"));

    let json = serde_json::to_string_pretty(candidate)?;
    tokio::fs::write(&path, &json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(path)
}
