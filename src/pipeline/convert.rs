//! Phase 2: transcode downloaded `.m4a` files to the target format.
//!
//! The codec table is fixed:
//!
//! | target | encoder      | extension | flags     |
//! |--------|--------------|-----------|-----------|
//! | mp3    | `libmp3lame` | `.mp3`    | `-q:a 2`  |
//! | flac   | `flac`       | `.flac`   |           |
//! | alac   | `alac`       | `.m4a`    |           |
//!
//! ALAC shares the intermediate extension, so its output gets a
//! ` (ALAC)` stem marker instead of overwriting the input.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::tools::{ExternalTool, ToolError};

use super::outcome::WorkResult;

/// Extension produced by the downloader
pub const INTERMEDIATE_EXTENSION: &str = "m4a";

/// Stem suffix for ALAC output written next to its `.m4a` input
pub const ALAC_MARKER: &str = " (ALAC)";

/// Requested final format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TargetFormat {
    #[default]
    Mp3,
    Flac,
    Alac,
    /// Keep the downloader's output as-is
    M4a,
}

impl TargetFormat {
    /// Upper-case name for banners
    pub fn label(self) -> &'static str {
        match self {
            TargetFormat::Mp3 => "MP3",
            TargetFormat::Flac => "FLAC",
            TargetFormat::Alac => "ALAC",
            TargetFormat::M4a => "M4A",
        }
    }

    /// Encoder settings, or `None` when no conversion is needed
    pub fn codec(self) -> Option<Codec> {
        match self {
            TargetFormat::Mp3 => Some(Codec {
                encoder: "libmp3lame",
                extension: "mp3",
                quality_flags: &["-q:a", "2"],
            }),
            TargetFormat::Flac => Some(Codec {
                encoder: "flac",
                extension: "flac",
                quality_flags: &[],
            }),
            TargetFormat::Alac => Some(Codec {
                encoder: "alac",
                extension: "m4a",
                quality_flags: &[],
            }),
            TargetFormat::M4a => None,
        }
    }
}

/// One row of the codec table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    /// ffmpeg audio encoder name
    pub encoder: &'static str,
    /// Output extension without the dot
    pub extension: &'static str,
    pub quality_flags: &'static [&'static str],
}

/// Where the converted file for `input` goes.
pub fn output_path(input: &Path, codec: &Codec) -> PathBuf {
    let output = input.with_extension(codec.extension);
    if output != input {
        return output;
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, ALAC_MARKER, codec.extension))
}

/// True for files this tool itself produced as ALAC output.
pub fn is_marked_output(path: &Path) -> bool {
    path.file_stem()
        .map(|s| s.to_string_lossy().ends_with(ALAC_MARKER))
        .unwrap_or(false)
}

/// Arguments for `ffmpeg`: copy video (cover art) streams, encode audio,
/// keep the tool's own logging to errors only.
pub fn encoder_args(input: &Path, codec: &Codec, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-i".into(),
        input.as_os_str().to_os_string(),
        "-c:v".into(),
        "copy".into(),
        "-c:a".into(),
        codec.encoder.into(),
    ];
    args.extend(codec.quality_flags.iter().map(OsString::from));
    args.extend([
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        output.as_os_str().to_os_string(),
    ]);
    args
}

/// Convert one file. `base_dir` only shortens paths in messages.
pub async fn convert_one(
    input: &Path,
    base_dir: &Path,
    codec: Codec,
    cleanup: bool,
    encoder: &dyn ExternalTool,
) -> WorkResult {
    let rel = input.strip_prefix(base_dir).unwrap_or(input).display();
    let output = output_path(input, &codec);

    if output.exists() {
        return WorkResult::skipped(format!("'{}' already converted.", rel));
    }

    match encoder.invoke(&encoder_args(input, &codec, &output)).await {
        Ok(result) if result.success => {}
        Ok(result) => {
            return WorkResult::fail(format!(
                "{} failed for '{}'. Error: {}",
                encoder.name(),
                rel,
                result.stderr
            ));
        }
        Err(e @ ToolError::NotFound(_)) => return WorkResult::fail(e.to_string()),
        Err(e) => return WorkResult::fail(format!("{} for '{}'", e, rel)),
    }

    if !cleanup {
        return WorkResult::success(format!("Converted '{}'.", rel));
    }

    match std::fs::remove_file(input) {
        Ok(()) => WorkResult::success(format!("Converted '{}' and removed original.", rel)),
        Err(e) => WorkResult::fail(format!(
            "Converted '{}' but could not remove original: {}",
            rel, e
        )),
    }
}
