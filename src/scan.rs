//! Filesystem scanning for video files.
//!
//! Walks one or more root directories up to a depth limit and collects the
//! absolute paths of files whose extension is in the recognized set.
//! Extension matching is case-insensitive: `clip.MP4` and `clip.mp4` are
//! the same footage, and the collections this tool grew up on lived on
//! case-insensitive filesystems.
//!
//! Unreadable subdirectories and unsupported entries are logged and
//! skipped; only a missing or unreadable root is an error. The scanner
//! never touches the rating store itself; callers feed its output to
//! [`crate::store::RatingStore::merge`].

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, trace, warn};
use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};

lazy_static! {
    /// Extensions recognized when no configuration overrides them.
    pub static ref DEFAULT_EXTENSIONS: Vec<String> = [
        "avi", "wmv", "mkv", "mp4", "m4v", "mov", "webm", "mpg", "mpeg",
    ]
    .iter()
    .map(|ext| (*ext).to_string())
    .collect();
}

/// Scan `roots` recursively and return the sorted, deduplicated set of
/// absolute paths matching `extensions` (given without the leading dot).
///
/// `max_depth` counts directory levels below each root: `0` scans only the
/// root directory itself, `1` adds its immediate subdirectories, and so on.
///
/// # Errors
///
/// A root that does not exist or cannot be read is an error; failures
/// deeper in the tree are reported via the log and skipped.
pub fn scan_roots(roots: &[PathBuf], extensions: &[String], max_depth: u32) -> Result<Vec<String>> {
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();

    let mut found = Vec::new();
    for root in roots {
        let root = root
            .absolutize()
            .with_context(|| format!("cannot absolutize scan root {}", root.display()))?
            .to_path_buf();
        anyhow::ensure!(root.is_dir(), "scan root is not a directory: {}", root.display());

        let before = found.len();
        walk(&root, &extensions, max_depth, 0, &mut found)
            .with_context(|| format!("failed to scan {}", root.display()))?;
        debug!("found {} files under {}", found.len() - before, root.display());
    }

    found.sort_unstable();
    found.dedup();
    Ok(found)
}

fn walk(
    dir: &Path,
    extensions: &[String],
    max_depth: u32,
    depth: u32,
    found: &mut Vec<String>,
) -> Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if depth > 0 => {
            warn!("skipping unreadable directory {}: {err}", dir.display());
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("cannot read directory {}", dir.display()))
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping entry in {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                continue;
            }
        };

        if file_type.is_dir() {
            if depth < max_depth {
                walk(&path, extensions, max_depth, depth + 1, found)?;
            } else {
                trace!("depth limit reached, not descending into {}", path.display());
            }
        } else if file_type.is_file() && matches_extension(&path, extensions) {
            found.push(path.to_string_lossy().into_owned());
        }
    }

    Ok(())
}

/// Case-insensitive extension match against an already-lowercased set.
fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| extensions.iter().any(|known| *known == ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    fn fixture_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(root, "a.mp4");
        touch(root, "B.MKV");
        touch(root, "notes.txt");
        touch(root, "archive.mp4.bak");
        fs::create_dir_all(root.join("sub/deep")).unwrap();
        touch(&root.join("sub"), "c.avi");
        touch(&root.join("sub/deep"), "d.wmv");
        tmp
    }

    #[test]
    fn finds_recognized_files_recursively() {
        let tmp = fixture_tree();
        let found =
            scan_roots(&[tmp.path().to_path_buf()], &DEFAULT_EXTENSIONS, 10).unwrap();

        let names: Vec<&str> = found
            .iter()
            .map(|p| Path::new(p).file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B.MKV", "a.mp4", "c.avi", "d.wmv"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = fixture_tree();
        let found =
            scan_roots(&[tmp.path().to_path_buf()], &DEFAULT_EXTENSIONS, 10).unwrap();

        // `B.MKV` matches `mkv`; the filename itself is preserved as-is.
        assert!(found.iter().any(|p| p.ends_with("B.MKV")));
        // A trailing non-video extension does not match.
        assert!(!found.iter().any(|p| p.ends_with("archive.mp4.bak")));
        assert!(!found.iter().any(|p| p.ends_with("notes.txt")));
    }

    #[test]
    fn returned_paths_are_absolute_and_sorted() {
        let tmp = fixture_tree();
        let found =
            scan_roots(&[tmp.path().to_path_buf()], &DEFAULT_EXTENSIONS, 10).unwrap();

        assert!(found.iter().all(|p| Path::new(p).is_absolute()));
        let mut sorted = found.clone();
        sorted.sort_unstable();
        assert_eq!(found, sorted);
    }

    #[test]
    fn depth_limit_stops_descent() {
        let tmp = fixture_tree();

        let shallow = scan_roots(&[tmp.path().to_path_buf()], &DEFAULT_EXTENSIONS, 0).unwrap();
        let names: Vec<&str> = shallow
            .iter()
            .map(|p| Path::new(p).file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["B.MKV", "a.mp4"]);

        let one_level = scan_roots(&[tmp.path().to_path_buf()], &DEFAULT_EXTENSIONS, 1).unwrap();
        assert!(one_level.iter().any(|p| p.ends_with("c.avi")));
        assert!(!one_level.iter().any(|p| p.ends_with("d.wmv")));
    }

    #[test]
    fn overlapping_roots_are_deduplicated() {
        let tmp = fixture_tree();
        let roots = vec![tmp.path().to_path_buf(), tmp.path().to_path_buf()];
        let found = scan_roots(&roots, &DEFAULT_EXTENSIONS, 10).unwrap();
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(scan_roots(&[missing], &DEFAULT_EXTENSIONS, 10).is_err());
    }

    #[test]
    fn custom_extension_set_overrides_default() {
        let tmp = fixture_tree();
        let found =
            scan_roots(&[tmp.path().to_path_buf()], &["txt".to_string()], 10).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("notes.txt"));
    }
}
