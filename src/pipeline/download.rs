//! Phase 1: resolve each manifest entry to a track link and download it.

use std::ffi::OsString;
use std::path::Path;

use crate::manifest::ManifestEntry;
use crate::search::{TrackLookup, TrackSearch};
use crate::tools::{ExternalTool, ToolError};

use super::outcome::WorkResult;

/// Arguments for `gamdl`
pub fn downloader_args(output_dir: &Path, url: &str) -> Vec<OsString> {
    vec![
        OsString::from("--output-path"),
        output_dir.as_os_str().to_os_string(),
        OsString::from(url),
    ]
}

/// Resolve and download a single entry. Never retries.
pub async fn download_one(
    entry: &ManifestEntry,
    output_dir: &Path,
    search: &dyn TrackSearch,
    downloader: &dyn ExternalTool,
) -> WorkResult {
    let term = entry.search_term();

    let url = match search.lookup(&term).await {
        Ok(TrackLookup::Found { url }) => url,
        Ok(TrackLookup::NoResults) => {
            return WorkResult::not_found(format!("'{}' not found on Apple Music.", term));
        }
        Ok(TrackLookup::MissingUrl) => {
            return WorkResult::not_found(format!(
                "URL not found in API response for '{}'.",
                term
            ));
        }
        Err(e) => {
            return WorkResult::fail(format!("API request failed for '{}': {}", term, e));
        }
    };

    tracing::debug!(target: "process::download", %term, %url, "Resolved");

    match downloader.invoke(&downloader_args(output_dir, &url)).await {
        Ok(output) if output.success => {
            WorkResult::success(format!("Successfully downloaded '{}'.", term))
        }
        Ok(output) => WorkResult::fail(format!(
            "{} failed for '{}'. Error: {}",
            downloader.name(),
            term,
            output.stderr
        )),
        Err(e @ ToolError::NotFound(_)) => WorkResult::fail(e.to_string()),
        Err(e) => WorkResult::fail(format!("{} for '{}'", e, term)),
    }
}
