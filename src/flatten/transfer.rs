//! Copying and moving a single file into the flat destination.
//!
//! Collisions are never resolved: an existing destination file is left
//! untouched and the transfer is reported as skipped.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;

/// What to do with each matched file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Action {
    /// Leave the source in place
    #[default]
    Copy,
    /// Remove the source after transfer
    Move,
}

impl Action {
    /// Upper-case tag used in status lines
    pub fn label(self) -> &'static str {
        match self {
            Action::Copy => "COPY",
            Action::Move => "MOVE",
        }
    }

    /// Past tense used in the summary
    pub fn past_tense(self) -> &'static str {
        match self {
            Action::Copy => "copied",
            Action::Move => "moved",
        }
    }
}

/// Result of a transfer that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The file was copied or moved (or would have been, in dry-run mode)
    Transferred,
    /// Destination already existed
    Exists,
}

/// Transfer `source` to `dest` unless `dest` already exists.
///
/// With `dry_run` set, only the collision check runs.
pub fn transfer(
    source: &Path,
    dest: &Path,
    action: Action,
    dry_run: bool,
) -> io::Result<TransferOutcome> {
    if dest.exists() {
        return Ok(TransferOutcome::Exists);
    }
    if dry_run {
        return Ok(TransferOutcome::Transferred);
    }

    match action {
        Action::Copy => copy_preserving(source, dest)?,
        Action::Move => move_file(source, dest)?,
    }
    Ok(TransferOutcome::Transferred)
}

/// Copy contents, access/modification times and permissions.
///
/// Times are set through the handle that wrote the data and permissions are
/// applied last, so read-only sources copy cleanly. On failure after `dest`
/// was created, the partial copy is removed.
pub fn copy_preserving(source: &Path, dest: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    let mut reader = File::open(source)?;
    let mut writer = File::create_new(dest)?;

    let result = (|| {
        io::copy(&mut reader, &mut writer)?;
        let mut times = FileTimes::new().set_modified(meta.modified()?);
        if let Ok(accessed) = meta.accessed() {
            times = times.set_accessed(accessed);
        }
        writer.set_times(times)?;
        fs::set_permissions(dest, meta.permissions())
    })();

    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(dest);
    }
    result
}

/// Rename, falling back to copy + delete when crossing devices.
pub fn move_file(source: &Path, dest: &Path) -> io::Result<()> {
    if fs::rename(source, dest).is_err() {
        copy_preserving(source, dest)?;
        fs::remove_file(source)?;
    }
    Ok(())
}
