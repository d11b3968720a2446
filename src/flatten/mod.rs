//! Flattening a nested `Artist/Album/Song` tree into a single directory.
//!
//! # Pipeline
//! 1. [`scanner::scan_extensions`] collects candidates, one pass per format
//! 2. [`naming::derive_name`] builds a collision-resistant flat name
//! 3. [`transfer::transfer`] copies or moves, skipping existing names
//!
//! Files are processed sequentially, so the existence check and the write
//! for a given destination name cannot race with each other.

pub mod naming;
pub mod transfer;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};
use crate::scanner;

pub use naming::derive_name;
pub use transfer::{Action, TransferOutcome};

/// Parameters for one flatten run
#[derive(Debug, Clone)]
pub struct FlattenRequest {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub action: Action,
    /// Extensions to collect; leading dots are accepted
    pub formats: Vec<String>,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
}

/// Progress reported while flattening
#[derive(Debug)]
pub enum FlattenEvent {
    /// Source validated and destination ready
    Started {
        source: PathBuf,
        dest: PathBuf,
        action: Action,
        dry_run: bool,
    },
    /// One discovery pass finished
    Found { extension: String, count: usize },
    /// File copied or moved (or would be, in dry-run mode)
    Transferred {
        action: Action,
        dry_run: bool,
        relative: PathBuf,
        name: String,
    },
    /// Destination name already taken
    Skipped { name: String },
    /// Filesystem error while transferring
    Failed { file: String, error: std::io::Error },
}

impl fmt::Display for FlattenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlattenEvent::Started {
                source,
                dest,
                action,
                dry_run,
            } => {
                writeln!(f, "Source: '{}'", source.display())?;
                writeln!(f, "Destination: '{}'", dest.display())?;
                let mode = if *dry_run { " (dry run)" } else { "" };
                writeln!(f, "Action: {}{}", action.label(), mode)?;
                write!(f, "{}", "-".repeat(50))
            }
            FlattenEvent::Found { extension, count } => {
                write!(f, "Found {} '.{}' files.", count, extension)
            }
            FlattenEvent::Transferred {
                action,
                dry_run,
                relative,
                name,
            } => {
                let prefix = if *dry_run { "WOULD " } else { "" };
                write!(
                    f,
                    "[{}{}] '{}' -> '{}'",
                    prefix,
                    action.label(),
                    relative.display(),
                    name
                )
            }
            FlattenEvent::Skipped { name } => {
                write!(f, "[SKIP] '{}' already exists in destination.", name)
            }
            FlattenEvent::Failed { file, error } => {
                write!(f, "[ERROR] Could not process '{}': {}", file, error)
            }
        }
    }
}

/// Totals for one flatten run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenSummary {
    /// Files discovered across all discovery passes
    pub found: usize,
    /// Files copied or moved
    pub processed: usize,
    /// Collisions plus failures
    pub skipped: usize,
}

/// Flatten `request.source_dir` into `request.dest_dir`.
///
/// Returns [`Error::SourceMissing`] before doing anything if the source is
/// not a directory. Per-file problems never abort the run; they are
/// reported through `on_event` and counted as skipped.
pub fn flatten(
    request: &FlattenRequest,
    mut on_event: impl FnMut(&FlattenEvent),
) -> Result<FlattenSummary> {
    let source = request.source_dir.as_path();
    if !source.is_dir() {
        return Err(Error::source_missing(source));
    }

    if !request.dry_run {
        std::fs::create_dir_all(&request.dest_dir).with_context(format!(
            "Failed to create destination {}",
            request.dest_dir.display()
        ))?;
    }

    on_event(&FlattenEvent::Started {
        source: absolute(source),
        dest: absolute(&request.dest_dir),
        action: request.action,
        dry_run: request.dry_run,
    });

    let mut candidates = Vec::new();
    for matches in scanner::scan_extensions(source, &request.formats) {
        on_event(&FlattenEvent::Found {
            extension: matches.extension,
            count: matches.files.len(),
        });
        candidates.extend(matches.files);
    }

    let mut summary = FlattenSummary {
        found: candidates.len(),
        ..Default::default()
    };

    for path in &candidates {
        let event = flatten_one(request, path);
        match &event {
            FlattenEvent::Transferred { .. } => summary.processed += 1,
            FlattenEvent::Skipped { .. } | FlattenEvent::Failed { .. } => summary.skipped += 1,
            FlattenEvent::Started { .. } | FlattenEvent::Found { .. } => {}
        }
        on_event(&event);
    }

    tracing::info!(
        target: "flatten",
        found = summary.found,
        processed = summary.processed,
        skipped = summary.skipped,
        "Flatten finished"
    );
    Ok(summary)
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn flatten_one(request: &FlattenRequest, path: &Path) -> FlattenEvent {
    let name = derive_name(path, &request.source_dir);
    let dest = request.dest_dir.join(&name);

    match transfer::transfer(path, &dest, request.action, request.dry_run) {
        Ok(TransferOutcome::Exists) => FlattenEvent::Skipped { name },
        Ok(TransferOutcome::Transferred) => FlattenEvent::Transferred {
            action: request.action,
            dry_run: request.dry_run,
            relative: path
                .strip_prefix(&request.source_dir)
                .unwrap_or(path)
                .to_path_buf(),
            name,
        },
        Err(error) => {
            tracing::debug!(target: "flatten", path = %path.display(), error = %error, "Transfer failed");
            FlattenEvent::Failed {
                file: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                error,
            }
        }
    }
}
