//! Recursive discovery of files by extension.
//!
//! Used by the flattener (one pass per requested extension) and by the
//! conversion phase (one pass for the intermediate `.m4a` files).

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Strip surrounding whitespace and any leading dots from a user-supplied
/// extension, so `".mp3"`, `"mp3"` and `" .mp3 "` all mean the same thing.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

/// Returns `true` if the file name ends in `.<ext>` (case-sensitive) and has
/// something before the dot.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let suffix = format!(".{}", ext);
    name.len() > suffix.len() && name.ends_with(&suffix)
}

/// Recursively collect regular files under `root` with the given extension.
///
/// Traversal order is sorted by file name for stable output. Unreadable
/// entries are skipped. Symlinks to files count as files; symlinked
/// directories are not descended into.
pub fn find_files(root: &Path, ext: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| has_extension(e.path(), ext))
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Files found for one requested extension.
#[derive(Debug, Clone)]
pub struct ExtensionMatches {
    /// Normalized extension (no leading dot)
    pub extension: String,
    pub files: Vec<PathBuf>,
}

/// Run one discovery pass per requested extension.
///
/// Overlapping extensions (e.g. `mp3` and `.mp3`) are not merged, so the same
/// file can appear once per pass that matched it.
pub fn scan_extensions(root: &Path, formats: &[String]) -> Vec<ExtensionMatches> {
    formats
        .iter()
        .map(|fmt| {
            let extension = normalize_extension(fmt);
            let files = find_files(root, &extension);
            tracing::debug!(target: "scanner", ext = %extension, count = files.len(), "Scanned");
            ExtensionMatches { extension, files }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::touch;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("mp3"), "mp3");
        assert_eq!(normalize_extension(".flac"), "flac");
        assert_eq!(normalize_extension(" ..m4a "), "m4a");
    }

    #[test]
    fn test_has_extension_is_case_sensitive() {
        assert!(has_extension(Path::new("/a/song.mp3"), "mp3"));
        assert!(!has_extension(Path::new("/a/SONG.MP3"), "mp3"));
        assert!(!has_extension(Path::new("/a/song.mp3.txt"), "mp3"));
        assert!(!has_extension(Path::new("/a/.mp3"), "mp3"));
    }

    #[test]
    fn test_find_files_recurses() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("top.mp3"));
        touch(&root.join("Artist/Album/deep.mp3"));
        touch(&root.join("Artist/Album/cover.jpg"));
        touch(&root.join("a/b/c/d/deeper.mp3"));
        touch(&root.join("Upper.MP3"));
        std::fs::create_dir_all(root.join("folder.mp3")).unwrap();

        let files = find_files(root, "mp3");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(files.len(), 3);
        assert!(names.contains(&"top.mp3"));
        assert!(names.contains(&"deep.mp3"));
        assert!(names.contains(&"deeper.mp3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_includes_symlinked_files() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("lib");
        let elsewhere = dir.path().join("elsewhere.mp3");
        touch(&elsewhere);
        touch(&root.join("real.mp3"));
        std::os::unix::fs::symlink(&elsewhere, root.join("linked.mp3")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.mp3"), root.join("dangling.mp3")).unwrap();

        let names: Vec<_> = find_files(&root, "mp3")
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["linked.mp3".to_string(), "real.mp3".to_string()]);
    }

    #[test]
    fn test_scan_extensions_one_pass_per_format() {
        let dir = tempdir().unwrap();
        let root = dir.path();

        touch(&root.join("x/one.mp3"));
        touch(&root.join("x/two.flac"));
        touch(&root.join("three.flac"));

        let matches = scan_extensions(root, &["mp3".into(), ".flac".into()]);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].extension, "mp3");
        assert_eq!(matches[0].files.len(), 1);
        assert_eq!(matches[1].extension, "flac");
        assert_eq!(matches[1].files.len(), 2);
    }

    #[test]
    fn test_overlapping_formats_find_duplicates() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("song.mp3"));

        let matches = scan_extensions(dir.path(), &["mp3".into(), ".mp3".into()]);
        let total: usize = matches.iter().map(|m| m.files.len()).sum();

        assert_eq!(total, 2);
    }
}
