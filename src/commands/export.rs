//! Event CSV export
//!
//! The server builds the file; this command saves it under the name the
//! server suggests and counts its records as a sanity check.

use super::{Context, Result};
use crate::BoxofficeError;
use crate::api::Transport;
use crate::models::ExportFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Shown for any failure of the export
pub const EXPORT_FAILED: &str = "Failed to download events CSV.";

/// Used when the server suggests no usable name
pub const DEFAULT_FILE_NAME: &str = "events.csv";

/// Last path component of the server's suggested name
#[must_use]
pub fn file_name(suggested: Option<&str>) -> String {
    suggested
        .and_then(|name| name.trim().rsplit(['/', '\\']).next())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map_or_else(|| DEFAULT_FILE_NAME.to_string(), str::to_string)
}

/// Number of data records in a CSV document with a header row
///
/// # Errors
///
/// Returns `csv::Error` for malformed rows.
pub fn count_records(data: &str) -> std::result::Result<usize, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());
    let mut count = 0;
    for record in reader.records() {
        record?;
        count += 1;
    }
    Ok(count)
}

/// Download the event export into `dir`
///
/// # Errors
/// Returns `BoxofficeError::Failed` with [`EXPORT_FAILED`] whatever went wrong;
/// the cause is logged
pub async fn execute<T: Transport>(ctx: &Context<'_, T>, dir: &Path) -> Result<PathBuf> {
    match download(ctx, dir).await {
        Ok((path, records)) => {
            ctx.output
                .success(&format!("Exported {records} events to {}", path.display()));
            Ok(path)
        }
        Err(err) => {
            log::warn!("event export failed: {err}");
            Err(BoxofficeError::Failed(EXPORT_FAILED.to_string()))
        }
    }
}

async fn download<T: Transport>(ctx: &Context<'_, T>, dir: &Path) -> Result<(PathBuf, usize)> {
    let file: ExportFile = ctx.client.get("/event/export", Vec::new()).await?;
    log::debug!(
        "export is {} bytes of {}",
        file.data.len(),
        file.content_type.as_deref().unwrap_or("unknown type")
    );
    let records = count_records(&file.data)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(file.file_name.as_deref()));
    fs::write(&path, &file.data)?;
    Ok((path, records))
}
