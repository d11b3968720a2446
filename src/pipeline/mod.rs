//! Download-then-convert orchestration.
//!
//! Two sequential phases, each a bounded pool of independent tasks:
//! 1. **Download** - one task per manifest entry (see [`download`])
//! 2. **Convert** - one task per `.m4a` file in the output directory
//!    (see [`convert`]); skipped when the target is `m4a`
//!
//! Results are reported in completion order. Nothing is retried, and a
//! failed item never stops the others.

pub mod convert;
pub mod download;
pub mod outcome;
pub mod pool;
pub mod report;

use std::path::PathBuf;

use crate::error::{Error, Result, ResultExt};
use crate::manifest::{self, ManifestLine};
use crate::scanner;
use crate::search::TrackSearch;
use crate::tools::ExternalTool;

pub use convert::{Codec, TargetFormat};
pub use outcome::{PhaseSummary, WorkResult, WorkStatus};
pub use report::{ConsoleReporter, Phase, Reporter};

/// Parameters for one orchestrator run
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Manifest; required unless `convert_only`
    pub list_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: TargetFormat,
    /// Delete each `.m4a` after a successful conversion
    pub cleanup: bool,
    pub convert_only: bool,
    pub download_workers: usize,
    pub convert_workers: usize,
}

/// Runs both phases against the given collaborators.
pub struct Orchestrator {
    search: Box<dyn TrackSearch>,
    downloader: Box<dyn ExternalTool>,
    encoder: Box<dyn ExternalTool>,
}

impl Orchestrator {
    pub fn new(
        search: Box<dyn TrackSearch>,
        downloader: Box<dyn ExternalTool>,
        encoder: Box<dyn ExternalTool>,
    ) -> Self {
        Self {
            search,
            downloader,
            encoder,
        }
    }

    /// Run the requested phases.
    ///
    /// Only failing to create the output directory is an error; a missing
    /// manifest aborts phase 1 with a notice and conversion still runs.
    pub async fn run(&self, request: &ProcessRequest, reporter: &mut dyn Reporter) -> Result<()> {
        std::fs::create_dir_all(&request.output_dir).with_context(format!(
            "Failed to create output directory {}",
            request.output_dir.display()
        ))?;

        if !request.convert_only {
            let list_file = request
                .list_file
                .as_ref()
                .ok_or_else(|| Error::usage("--list-file is required unless --convert-only is used."))?;
            self.download_phase(list_file, request, reporter).await;
        }

        self.conversion_phase(request, reporter).await;
        reporter.finished();
        Ok(())
    }

    /// Phase 1. Returns `None` if the manifest could not be read.
    pub async fn download_phase(
        &self,
        list_file: &std::path::Path,
        request: &ProcessRequest,
        reporter: &mut dyn Reporter,
    ) -> Option<PhaseSummary> {
        let phase = Phase::Download;
        reporter.phase_started(phase, request.download_workers);

        let lines = match manifest::read(list_file) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(target: "process::download", error = %e, "Manifest unreadable");
                reporter.notice(&format!("Error: {}", e));
                return None;
            }
        };

        let mut invalid = PhaseSummary::default();
        let mut entries = Vec::new();
        for line in lines {
            match line {
                ManifestLine::Entry(entry) => entries.push(entry),
                ManifestLine::Invalid(raw) => {
                    let result = WorkResult::skipped(format!("Invalid format: {}", raw));
                    invalid.record(&result);
                    reporter.item(&result);
                }
            }
        }

        tracing::info!(target: "process::download", entries = entries.len(), "Starting downloads");

        let output_dir = request.output_dir.as_path();
        let search = &*self.search;
        let downloader = &*self.downloader;
        let mut summary = pool::run_bounded(
            entries,
            request.download_workers,
            |entry| async move { download::download_one(&entry, output_dir, search, downloader).await },
            |result| reporter.item(result),
        )
        .await;
        summary.skipped += invalid.skipped;

        reporter.phase_finished(phase, &summary);
        Some(summary)
    }

    /// Phase 2. Returns `None` if no conversion was needed.
    pub async fn conversion_phase(
        &self,
        request: &ProcessRequest,
        reporter: &mut dyn Reporter,
    ) -> Option<PhaseSummary> {
        let phase = Phase::Convert(request.format);
        reporter.phase_started(phase, request.convert_workers);

        let Some(codec) = request.format.codec() else {
            reporter.notice("Target format is M4A, no conversion necessary.");
            return None;
        };

        let directory = request.output_dir.as_path();
        let (marked, files): (Vec<PathBuf>, Vec<PathBuf>) =
            scanner::find_files(directory, convert::INTERMEDIATE_EXTENSION)
                .into_iter()
                .partition(|p| request.format == TargetFormat::Alac && convert::is_marked_output(p));

        let mut excluded = PhaseSummary::default();
        for path in &marked {
            let rel = path.strip_prefix(directory).unwrap_or(path);
            let result = WorkResult::skipped(format!("'{}' is ALAC output, not converted.", rel.display()));
            excluded.record(&result);
            reporter.item(&result);
        }

        if files.is_empty() {
            let shown = directory.canonicalize().unwrap_or_else(|_| directory.to_path_buf());
            reporter.notice(&format!(
                "No .m4a files found in '{}' to convert.",
                shown.display()
            ));
            reporter.phase_finished(phase, &excluded);
            return Some(excluded);
        }

        reporter.notice(&format!("Found {} .m4a file(s) for conversion.", files.len()));
        tracing::info!(target: "process::convert", files = files.len(), format = request.format.label(), "Starting conversion");

        let encoder = &*self.encoder;
        let cleanup = request.cleanup;
        let mut summary = pool::run_bounded(
            files,
            request.convert_workers,
            |file| async move { convert::convert_one(&file, directory, codec, cleanup, encoder).await },
            |result| reporter.item(result),
        )
        .await;
        summary.skipped += excluded.skipped;

        reporter.phase_finished(phase, &summary);
        Some(summary)
    }
}
