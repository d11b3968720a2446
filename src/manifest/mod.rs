//! Song list ("manifest") parsing.
//!
//! One `Artist - Title` entry per line. Blank lines and lines starting with
//! `#` are ignored. Only the first `" - "` separates artist from title, so
//! titles may contain the separator but artists may not.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Separator between artist and title
pub const SEPARATOR: &str = " - ";

/// Comment marker
pub const COMMENT: char = '#';

/// A parsed `Artist - Title` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub artist: String,
    pub title: String,
}

impl ManifestEntry {
    /// Free-text term sent to the search API
    pub fn search_term(&self) -> String {
        format!("{}{}{}", self.artist, SEPARATOR, self.title)
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.search_term())
    }
}

/// A meaningful manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine {
    Entry(ManifestEntry),
    /// Non-comment line without a separator, kept for reporting
    Invalid(String),
}

/// Parse one raw line. Returns `None` for blank and comment lines.
pub fn parse_line(raw: &str) -> Option<ManifestLine> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(COMMENT) {
        return None;
    }

    match line.split_once(SEPARATOR) {
        Some((artist, title)) => Some(ManifestLine::Entry(ManifestEntry {
            artist: artist.trim().to_string(),
            title: title.trim().to_string(),
        })),
        None => Some(ManifestLine::Invalid(line.to_string())),
    }
}

/// Parse a whole manifest from text.
pub fn parse(contents: &str) -> Vec<ManifestLine> {
    contents.lines().filter_map(parse_line).collect()
}

/// Read and parse a manifest file.
///
/// A missing file is [`Error::ManifestMissing`]; nothing is partially read.
pub fn read(path: &Path) -> Result<Vec<ManifestLine>> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::manifest_missing(path),
        _ => Error::Io(e).context(format!("reading {}", path.display())),
    })?;
    Ok(parse(&contents))
}
