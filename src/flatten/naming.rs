//! Destination name derivation.
//!
//! The flat name encodes the file's lineage relative to the source root so
//! that `Artist/Album/01.mp3` and `Other/Album/01.mp3` do not collide:
//!
//! | location                  | name                               |
//! |---------------------------|------------------------------------|
//! | `root/song.mp3`           | `song.mp3`                         |
//! | `root/Album/song.mp3`     | `Album - song.mp3`                 |
//! | `root/.../Artist/Album/s` | `Artist - Album - s`               |
//!
//! Only the two nearest ancestors are used, however deep the file sits.

use std::path::Path;

/// Derive the flat destination file name for `path` found under `root`.
///
/// Pure function of its inputs. Falls back to the bare file name when an
/// ancestor or its name cannot be determined.
pub fn derive_name(path: &Path, root: &Path) -> String {
    lineage_name(path, root).unwrap_or_else(|| bare_name(path))
}

fn lineage_name(path: &Path, root: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_string_lossy();
    let parent = path.parent()?;
    let grandparent = parent.parent();

    if grandparent == Some(root) {
        let album = parent.file_name()?.to_string_lossy();
        return Some(format!("{} - {}", album, file_name));
    }

    if parent == root {
        return Some(file_name.into_owned());
    }

    let artist = grandparent?.file_name()?.to_string_lossy();
    let album = parent.file_name()?.to_string_lossy();
    Some(format!("{} - {} - {}", artist, album, file_name))
}

fn bare_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    /// A single path segment without separators or dot-only names
    fn segment() -> impl Strategy<Value = String> {
        prop::string::string_regex("[A-Za-z0-9 _()-]{1,20}")
            .unwrap()
            .prop_filter("no blank segments", |s| !s.trim().is_empty())
    }

    fn build(root: &Path, dirs: &[String], file: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        for d in dirs {
            path.push(d);
        }
        path.push(file);
        path
    }

    proptest! {
        /// Same inputs always produce the same name
        #[test]
        fn derivation_is_deterministic(
            dirs in prop::collection::vec(segment(), 0..6),
            file in segment(),
        ) {
            let root = PathBuf::from("/lib/root");
            let path = build(&root, &dirs, &file);
            prop_assert_eq!(derive_name(&path, &root), derive_name(&path, &root));
        }

        /// Rule selection depends only on depth below the root
        #[test]
        fn rule_follows_depth(
            dirs in prop::collection::vec(segment(), 0..6),
            file in segment(),
        ) {
            let root = PathBuf::from("/lib/root");
            let path = build(&root, &dirs, &file);
            let name = derive_name(&path, &root);

            let expected = match dirs.len() {
                0 => file.clone(),
                1 => format!("{} - {}", dirs[0], file),
                n => format!("{} - {} - {}", dirs[n - 2], dirs[n - 1], file),
            };
            prop_assert_eq!(name, expected);
        }

        /// The derived name always ends with the original file name
        #[test]
        fn name_keeps_file_name_suffix(
            dirs in prop::collection::vec(segment(), 0..6),
            file in segment(),
        ) {
            let root = PathBuf::from("/lib/root");
            let path = build(&root, &dirs, &file);
            prop_assert!(derive_name(&path, &root).ends_with(&file));
        }
    }
}
