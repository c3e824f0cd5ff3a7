//! JSON output.
//!
//! The [`Report`] is written as indented UTF-8 JSON. It is the complete
//! record of a run: the HTML page is rendered from the same value, so
//! deserializing the JSON gives back everything the page shows.

use crate::models::Report;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write `report` to `{dir}/{stem}.json`.
///
/// # Returns
///
/// The path written, or an error if serialization or the write fails.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %stem))]
pub async fn write_report(
    report: &Report,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = dir.join(format!("{stem}.json"));

    fs::write(&path, json).await?;
    info!(path = %path.display(), sections = report.sections.len(), "Wrote JSON report");

    Ok(path)
}
