//! JSON output for a scraped day.
//!
//! One file per date, `{json_output_dir}/{YYYY-MM-DD}.json`. Re-running for
//! the same date overwrites the previous file.

use crate::models::DailyPage;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`DailyPage`] as pretty-printed JSON and return the file path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_daily_page(
    page: &DailyPage,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(page)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(format!("{}.json", page.readings.file_stem()));
    info!(path = %path.display(), "Writing JSON");
    let bytes = json.len();
    fs::write(&path, json).await?;
    info!(path = %path.display(), bytes, "Wrote daily readings");

    Ok(path)
}
