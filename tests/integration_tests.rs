//! # Integration Tests for Unrandom
//!
//! End-to-end tests of the scan → merge → rate → select workflow against
//! real temporary directories and database files, plus CLI smoke tests.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use unrandom::algorithm::{self, TierWeights};
use unrandom::store::RatingStore;
use unrandom::{db, scan};

/// Test helper: a collection directory with a handful of video files and
/// one file the scanner must ignore.
fn create_test_collection() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    fs::create_dir_all(root.join("series/season1"))?;
    for name in [
        "movie-a.mp4",
        "movie-b.mkv",
        "series/season1/ep1.avi",
        "series/season1/ep2.AVI",
    ] {
        fs::write(root.join(name), b"")?;
    }
    fs::write(root.join("subtitles.srt"), b"")?;

    Ok(temp_dir)
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = Command::new("cargo")
            .args(["run", "--quiet", "--", "--help"])
            .output()
            .expect("Failed to run help command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("unrandom"));
        assert!(stdout.contains("scan"));
        assert!(stdout.contains("rate"));
        assert!(stdout.contains("play"));
        assert!(stdout.contains("list"));
        assert!(stdout.contains("completion"));
    }

    #[test]
    fn test_cli_version_flag() {
        let output = Command::new("cargo")
            .args(["run", "--quiet", "--", "--version"])
            .output()
            .expect("Failed to run version command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("unrandom"));
        assert!(stdout.contains("0.3.0"));
    }
}

#[cfg(test)]
mod workflow_tests {
    use super::*;

    fn scan_all(root: &Path) -> Vec<String> {
        scan::scan_roots(&[root.to_path_buf()], &scan::DEFAULT_EXTENSIONS, 10).unwrap()
    }

    #[test]
    fn test_scan_merge_save_load_session() -> Result<()> {
        let collection = create_test_collection()?;
        let data_dir = TempDir::new()?;
        let db_path = data_dir.path().join("ratings.db");

        // Session one: scan and persist.
        let mut store = db::load(&db_path)?;
        let found = scan_all(collection.path());
        assert_eq!(found.len(), 4, "srt file must be ignored: {found:?}");
        store.merge(found);
        db::save(&store, &db_path)?;

        // Session two: everything is back, still unrated.
        let store = db::load(&db_path)?;
        assert_eq!(store.len(), 4);
        assert_eq!(store.unrated().len(), 4);
        Ok(())
    }

    #[test]
    fn test_ratings_survive_rescan() -> Result<()> {
        let collection = create_test_collection()?;
        let data_dir = TempDir::new()?;
        let db_path = data_dir.path().join("ratings.db");

        let mut store = db::load(&db_path)?;
        let found = scan_all(collection.path());
        store.merge(found);

        let first = store.unrated()[0].to_string();
        store.set_rating(&first, 3)?;
        db::save(&store, &db_path)?;

        // A new file appears; rescan and merge again.
        fs::write(collection.path().join("movie-c.webm"), b"")?;
        let mut store = db::load(&db_path)?;
        store.merge(scan_all(collection.path()));
        db::save(&store, &db_path)?;

        let store = db::load(&db_path)?;
        assert_eq!(store.len(), 5);
        assert_eq!(store.rating(&first), Some(Some(3)));
        assert_eq!(store.unrated().len(), 4);
        Ok(())
    }

    #[test]
    fn test_prune_removes_deleted_files_only_on_request() -> Result<()> {
        let collection = create_test_collection()?;
        let data_dir = TempDir::new()?;
        let db_path = data_dir.path().join("ratings.db");

        let mut store = db::load(&db_path)?;
        store.merge(scan_all(collection.path()));
        let doomed = collection.path().join("movie-a.mp4");
        let doomed_key = scan_all(collection.path())
            .into_iter()
            .find(|p| p.ends_with("movie-a.mp4"))
            .unwrap();
        store.set_rating(&doomed_key, 2)?;
        db::save(&store, &db_path)?;

        fs::remove_file(&doomed)?;

        // Plain rescan: the stale entry stays, rating intact.
        let mut store = db::load(&db_path)?;
        let found = scan_all(collection.path());
        store.merge(found.iter().cloned());
        assert_eq!(store.rating(&doomed_key), Some(Some(2)));

        // Explicit prune: now it goes.
        let keep: std::collections::HashSet<String> = found.into_iter().collect();
        let removed = store.prune_missing(&keep);
        assert_eq!(removed, vec![doomed_key.clone()]);
        assert!(!store.contains(&doomed_key));
        Ok(())
    }

    #[test]
    fn test_selection_only_returns_rated_files() -> Result<()> {
        let collection = create_test_collection()?;
        let mut store = RatingStore::new();
        store.merge(scan_all(collection.path()));

        let rated: Vec<String> = store.unrated()[..2].iter().map(|p| (*p).to_string()).collect();
        store.set_rating(&rated[0], 1)?;
        store.set_rating(&rated[1], 3)?;

        let weights = TierWeights::default();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let picked = algorithm::choose_file(&store, &weights, &mut rng).unwrap();
            assert!(rated.contains(&picked), "picked unrated file {picked}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod persistence_tests {
    use super::*;

    #[test]
    fn test_store_round_trip_equality() -> Result<()> {
        let data_dir = TempDir::new()?;
        let db_path = data_dir.path().join("ratings.db");

        let mut store = RatingStore::new();
        store.insert("/videos/a.mp4".to_string(), Some(1));
        store.insert("/videos/with, comma.mkv".to_string(), Some(2));
        store.insert("/videos/ünïcode — 映画.mp4".to_string(), None);

        db::save(&store, &db_path)?;
        assert_eq!(db::load(&db_path)?, store);
        Ok(())
    }

    #[test]
    fn test_interrupted_session_leaves_previous_database_valid() -> Result<()> {
        let data_dir = TempDir::new()?;
        let db_path = data_dir.path().join("ratings.db");

        let mut store = RatingStore::new();
        store.insert("/videos/a.mp4".to_string(), Some(2));
        db::save(&store, &db_path)?;

        // A session that loads, mutates in memory, and never saves must
        // not change what is on disk.
        let mut session = db::load(&db_path)?;
        session.set_rating("/videos/a.mp4", 1)?;
        drop(session);

        assert_eq!(db::load(&db_path)?.rating("/videos/a.mp4"), Some(Some(2)));
        Ok(())
    }
}
