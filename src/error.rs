//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`SearchError`](crate::search::SearchError),
//! [`ToolError`](crate::tools::ToolError)), while the CLI layer and `main`
//! use `anyhow` for convenient error propagation.
//!
//! Errors here abort a whole phase before any per-item work starts. Once
//! items are being processed, failures are turned into
//! [`WorkResult`](crate::pipeline::WorkResult)s instead.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Flatten source is missing or not a directory
    #[error("Source directory '{}' does not exist.", .0.display())]
    SourceMissing(PathBuf),

    /// Download manifest is missing
    #[error("The file '{}' was not found.", .0.display())]
    ManifestMissing(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid combination of arguments
    #[error("{0}")]
    Usage(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a source-missing error.
    pub fn source_missing(path: impl Into<PathBuf>) -> Self {
        Self::SourceMissing(path.into())
    }

    /// Create a manifest-missing error.
    pub fn manifest_missing(path: impl Into<PathBuf>) -> Self {
        Self::ManifestMissing(path.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// True for the "input is missing" class that aborts a phase without
    /// touching any item.
    pub fn is_source_missing(&self) -> bool {
        match self {
            Self::SourceMissing(_) | Self::ManifestMissing(_) => true,
            Self::WithContext { source, .. } => source.is_source_missing(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_missing_display() {
        let err = Error::source_missing("/music/nowhere");
        assert_eq!(
            err.to_string(),
            "Source directory '/music/nowhere' does not exist."
        );
        assert!(err.is_source_missing());
    }

    #[test]
    fn test_manifest_missing_display() {
        let err = Error::manifest_missing("songs.txt");
        assert_eq!(err.to_string(), "The file 'songs.txt' was not found.");
        assert!(err.is_source_missing());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config("bad value").context("while loading config");
        let msg = err.to_string();
        assert!(msg.contains("while loading config"));
        assert!(!err.is_source_missing());
    }

    #[test]
    fn test_context_keeps_source_missing_class() {
        let err = Error::manifest_missing("list.txt").context("download phase");
        assert!(err.is_source_missing());
    }

    #[test]
    fn test_usage_display_is_bare_message() {
        let err = Error::usage("--list-file is required unless --convert-only is used.");
        assert_eq!(
            err.to_string(),
            "--list-file is required unless --convert-only is used."
        );
        assert!(!err.is_source_missing());
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let with_ctx = result.with_context("creating destination");
        let msg = with_ctx.unwrap_err().to_string();
        assert!(msg.contains("creating destination"));
        assert!(msg.contains("disk full"));
    }
}
