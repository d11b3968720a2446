//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-batch\config.toml
//! - macOS: ~/Library/Application Support/music-batch/config.toml
//! - Linux: ~/.config/music-batch/config.toml
//!
//! The file is optional. Command-line flags take precedence over values
//! found here, and values found here take precedence over built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::search::DEFAULT_SEARCH_URL;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Download phase settings
    pub download: DownloadConfig,

    /// Conversion phase settings
    pub convert: ConvertConfig,

    /// Flatten settings
    pub flatten: FlattenConfig,
}

/// Download phase settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Number of concurrent download workers
    pub workers: usize,

    /// Search API request timeout in seconds
    pub timeout_secs: u64,

    /// Search endpoint
    pub search_url: String,

    /// Downloader executable (name on PATH or absolute path)
    pub downloader: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            timeout_secs: 15,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            downloader: "gamdl".to_string(),
        }
    }
}

impl DownloadConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Conversion phase settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Number of concurrent conversion workers (unset = logical CPU count)
    pub workers: Option<usize>,

    /// Encoder executable
    pub encoder: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            workers: None,
            encoder: "ffmpeg".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Configured worker count, falling back to the host's logical CPU count.
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(default_cpu_count)
    }
}

/// Flatten settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Extensions to collect when `--formats` is not given
    pub formats: Vec<String>,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            formats: vec!["mp3".to_string()],
        }
    }
}

/// Logical CPU count, or 1 if it cannot be determined.
pub fn default_cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-batch"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail.
pub fn load(path: Option<&Path>) -> Config {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => {
                tracing::warn!(target: "config", "Could not determine config directory, using defaults");
                return Config::default();
            }
        },
    };

    if !path.exists() {
        tracing::debug!(target: "config", path = %path.display(), "No config file found, using defaults");
        return Config::default();
    }

    match read_file(&path) {
        Ok(config) => {
            tracing::info!(target: "config", path = %path.display(), "Loaded config");
            config
        }
        Err(e) => {
            tracing::error!(target: "config", error = %e, "Using default configuration");
            Config::default()
        }
    }
}

/// Read and parse a config file.
pub fn read_file(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse(&contents)
        .map_err(|e| e.context(format!("parsing {}", path.display())))
}

/// Parse config from TOML text.
pub fn parse(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::config(e.to_string()))
}

// ============================================================================
// Tests
// ============================================================================
