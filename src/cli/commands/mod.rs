//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `flatten`: directory flattening
//! - `process`: download/convert orchestration
//! - `tools`: external tool availability

mod flatten;
mod process;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config;
use crate::flatten::Action;
use crate::pipeline::TargetFormat;

pub use flatten::cmd_flatten;
pub use process::cmd_process;
pub use tools::cmd_check_tools;

/// Music library batch utilities
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/music-batch/config.toml)
    #[arg(long, global = true, env = "MUSIC_BATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a nested directory of music files into a single folder
    Flatten {
        /// The source directory with nested music files
        source_dir: PathBuf,
        /// The destination directory for the flat file structure
        dest_dir: PathBuf,
        /// Copy or move files ('copy' is safer)
        #[arg(long, value_enum, default_value_t = Action::Copy)]
        action: Action,
        /// Space-separated file extensions to flatten, e.g. mp3 flac [default: mp3]
        #[arg(long, num_args = 1..)]
        formats: Vec<String>,
        /// Show what would be done without copying or moving anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Find, download, and/or convert music in parallel
    Process {
        /// Text file with 'Artist - Title' per line
        #[arg(short = 'l', long, required_unless_present = "convert_only")]
        list_file: Option<PathBuf>,
        /// Directory to download and/or convert music in
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Target audio format ('m4a' skips conversion)
        #[arg(short, long, value_enum, default_value_t = TargetFormat::Mp3)]
        format: TargetFormat,
        /// Delete original M4A files after successful conversion
        #[arg(long)]
        cleanup: bool,
        /// Skip the download phase and only convert existing files
        #[arg(long)]
        convert_only: bool,
        /// Number of parallel downloads [default: 4]
        #[arg(long)]
        download_workers: Option<usize>,
        /// Number of parallel conversions [default: logical CPU count]
        #[arg(long)]
        convert_workers: Option<usize>,
    },
    /// Check if gamdl and ffmpeg are installed
    CheckTools,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load(cli.config.as_deref());

    match &cli.command {
        Commands::Flatten {
            source_dir,
            dest_dir,
            action,
            formats,
            dry_run,
        } => cmd_flatten(&config, source_dir, dest_dir, *action, formats, *dry_run),
        Commands::Process {
            list_file,
            output_dir,
            format,
            cleanup,
            convert_only,
            download_workers,
            convert_workers,
        } => {
            let request = process::build_request(
                &config,
                process::ProcessArgs {
                    list_file: list_file.clone(),
                    output_dir: output_dir.clone(),
                    format: *format,
                    cleanup: *cleanup,
                    convert_only: *convert_only,
                    download_workers: *download_workers,
                    convert_workers: *convert_workers,
                },
            );
            cmd_process(&config, &request)
        }
        Commands::CheckTools => cmd_check_tools(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flatten_defaults() {
        let cli = Cli::try_parse_from(["music-batch", "flatten", "src", "dst"]).unwrap();
        match cli.command {
            Commands::Flatten {
                action,
                formats,
                dry_run,
                ..
            } => {
                assert_eq!(action, Action::Copy);
                assert!(formats.is_empty());
                assert!(!dry_run);
            }
            _ => panic!("expected flatten"),
        }
    }

    #[test]
    fn test_flatten_formats_and_action() {
        let cli = Cli::try_parse_from([
            "music-batch", "flatten", "src", "dst", "--action", "move", "--formats", "mp3", ".flac",
        ])
        .unwrap();
        match cli.command {
            Commands::Flatten { action, formats, .. } => {
                assert_eq!(action, Action::Move);
                assert_eq!(formats, vec!["mp3".to_string(), ".flac".to_string()]);
            }
            _ => panic!("expected flatten"),
        }
    }

    #[test]
    fn test_flatten_rejects_unknown_action() {
        let result = Cli::try_parse_from(["music-batch", "flatten", "a", "b", "--action", "link"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_process_requires_list_file() {
        let result = Cli::try_parse_from(["music-batch", "process"]);
        let err = result.err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_process_convert_only_needs_no_list() {
        let cli = Cli::try_parse_from(["music-batch", "process", "--convert-only", "-f", "alac"]).unwrap();
        match cli.command {
            Commands::Process {
                list_file,
                format,
                convert_only,
                output_dir,
                ..
            } => {
                assert!(list_file.is_none());
                assert!(convert_only);
                assert_eq!(format, TargetFormat::Alac);
                assert_eq!(output_dir, PathBuf::from("."));
            }
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn test_process_short_flags() {
        let cli = Cli::try_parse_from([
            "music-batch", "process", "-l", "songs.txt", "-o", "out", "-f", "m4a", "--cleanup",
            "--download-workers", "8",
        ])
        .unwrap();
        match cli.command {
            Commands::Process {
                list_file,
                output_dir,
                format,
                cleanup,
                download_workers,
                convert_workers,
                ..
            } => {
                assert_eq!(list_file, Some(PathBuf::from("songs.txt")));
                assert_eq!(output_dir, PathBuf::from("out"));
                assert_eq!(format, TargetFormat::M4a);
                assert!(cleanup);
                assert_eq!(download_workers, Some(8));
                assert_eq!(convert_workers, None);
            }
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn test_process_rejects_unknown_format() {
        let result = Cli::try_parse_from(["music-batch", "process", "--convert-only", "-f", "ogg"]);
        assert!(result.is_err());
    }
}
