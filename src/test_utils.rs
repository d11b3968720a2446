//! Test utilities and fixtures for music-batch tests.
//!
//! Filesystem helpers for building small library trees and manifests in
//! temporary directories.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{library_tree, write_file};
//!
//! #[test]
//! fn test_something() {
//!     let (dir, root) = library_tree();
//!     write_file(&root.join("extra.mp3"), b"data");
//!     // ... test logic
//! }
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, contents).expect("Failed to write test file");
}

/// Create an empty file, creating parent directories.
pub fn touch(path: &Path) {
    write_file(path, b"");
}

/// Creates a small nested library in a temp directory.
///
/// Layout under the returned root:
///
/// ```text
/// Root/ArtistA/AlbumX/song1.mp3
/// Root/song2.mp3
/// Root/AlbumOnly/song3.mp3
/// Root/AlbumOnly/notes.txt
/// ```
///
/// Keep the `TempDir` alive for the duration of your test.
pub fn library_tree() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = dir.path().join("Root");

    write_file(&root.join("ArtistA/AlbumX/song1.mp3"), b"song one");
    write_file(&root.join("song2.mp3"), b"song two");
    write_file(&root.join("AlbumOnly/song3.mp3"), b"song three");
    write_file(&root.join("AlbumOnly/notes.txt"), b"not music");

    (dir, root)
}

/// Writes a manifest with the given lines and returns its path.
pub fn manifest_file(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("songs.txt");
    write_file(&path, lines.join("\n").as_bytes());
    path
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_tree_layout() {
        let (_dir, root) = library_tree();
        assert!(root.join("ArtistA/AlbumX/song1.mp3").is_file());
        assert!(root.join("song2.mp3").is_file());
        assert!(root.join("AlbumOnly/song3.mp3").is_file());
        assert_eq!(file_names(&root), vec!["song2.mp3".to_string()]);
    }

    #[test]
    fn test_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = manifest_file(dir.path(), &["A - B", "# c"]);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "A - B\n# c");
    }
}
