//! Directory flattening command.

use std::path::Path;

use crate::config::Config;
use crate::flatten::{self, Action, FlattenRequest};

/// Pick the extensions to collect: flags first, then config.
pub fn resolve_formats(config: &Config, formats: &[String]) -> Vec<String> {
    if formats.is_empty() {
        config.flatten.formats.clone()
    } else {
        formats.to_vec()
    }
}

/// Flatten a nested music directory into a single folder
pub fn cmd_flatten(
    config: &Config,
    source_dir: &Path,
    dest_dir: &Path,
    action: Action,
    formats: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    let request = FlattenRequest {
        source_dir: source_dir.to_path_buf(),
        dest_dir: dest_dir.to_path_buf(),
        action,
        formats: resolve_formats(config, formats),
        dry_run,
    };

    let summary = match flatten::flatten(&request, |event| println!("{}", event)) {
        Ok(summary) => summary,
        Err(e) if e.is_source_missing() => {
            println!("Error: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if summary.found == 0 {
        println!("No matching music files found to process.");
        return Ok(());
    }

    println!("{}", "-".repeat(50));
    println!("Flattening process complete.");
    println!("  - Files {}: {}", action.past_tense(), summary.processed);
    println!("  - Files skipped:  {}", summary.skipped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{file_names, library_tree};

    #[test]
    fn test_resolve_formats_prefers_flags() {
        let config = Config::default();
        assert_eq!(resolve_formats(&config, &[]), vec!["mp3".to_string()]);
        assert_eq!(
            resolve_formats(&config, &["flac".to_string()]),
            vec!["flac".to_string()]
        );
    }

    #[test]
    fn test_missing_source_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_flatten(
            &Config::default(),
            &dir.path().join("nowhere"),
            &dir.path().join("out"),
            Action::Copy,
            &[],
            false,
        );
        assert!(result.is_ok());
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_flatten_command_copies() {
        let (dir, root) = library_tree();
        let dest = dir.path().join("Flat");

        cmd_flatten(&Config::default(), &root, &dest, Action::Copy, &[], false).unwrap();

        assert_eq!(
            file_names(&dest),
            vec![
                "AlbumOnly - song3.mp3".to_string(),
                "ArtistA - AlbumX - song1.mp3".to_string(),
                "song2.mp3".to_string(),
            ]
        );
    }
}
