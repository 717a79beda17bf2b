//! In-memory rating store.
//!
//! Maps absolute file paths to an optional integer rating; `None` means the
//! user has not rated the file yet. The store is loaded fully from disk at
//! the start of a session, mutated by scan-merge and the rating prompt, and
//! written back wholesale (see [`crate::db`]).
//!
//! Reconciliation semantics on rescan:
//! - paths already present keep their rating, whatever the scan says;
//! - newly discovered paths come in unrated;
//! - paths missing from the scan are kept as-is unless explicitly pruned.
//!   A file on an unmounted drive must not lose its rating.

use crate::error::StoreError;
use log::trace;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Mapping from absolute path to rating. Keys unique, iteration order
/// irrelevant; the sorted accessors exist only for stable user-facing
/// output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RatingStore {
    entries: HashMap<String, Option<u32>>,
}

impl RatingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Rating for `path`: `None` if the path is unknown,
    /// `Some(None)` if known but unrated.
    #[must_use]
    pub fn rating(&self, path: &str) -> Option<Option<u32>> {
        self.entries.get(path).copied()
    }

    /// Insert or replace an entry unconditionally. Used when rebuilding a
    /// store from its persisted form; scan reconciliation goes through
    /// [`RatingStore::merge`] instead, which never replaces.
    pub fn insert(&mut self, path: String, rating: Option<u32>) {
        self.entries.insert(path, rating);
    }

    /// Merge a set of discovered paths into the store. Paths not already
    /// present are inserted unrated; existing entries are never touched.
    /// Returns how many new entries were inserted.
    pub fn merge<I>(&mut self, discovered: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut inserted = 0;
        for path in discovered {
            self.entries.entry(path).or_insert_with(|| {
                inserted += 1;
                None
            });
        }
        trace!("merge inserted {inserted} new entries");
        inserted
    }

    /// Set the rating of an existing entry.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `path` is not a key in the store; ratings
    /// are only ever assigned to files a scan has actually discovered.
    pub fn set_rating(&mut self, path: &str, rating: u32) -> Result<(), StoreError> {
        match self.entries.get_mut(path) {
            Some(slot) => {
                *slot = Some(rating);
                Ok(())
            }
            None => Err(StoreError::NotFound(path.to_string())),
        }
    }

    /// All unrated paths, sorted. Sorting keeps the rating prompt stable
    /// across calls and groups files from the same directory together.
    #[must_use]
    pub fn unrated(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, rating)| rating.is_none())
            .map(|(path, _)| path.as_str())
            .collect();
        paths.sort_unstable();
        paths
    }

    /// Remove entries whose path is absent from `discovered` and return the
    /// removed paths, sorted. Only called when the user asked for pruning;
    /// the default policy is to retain stale entries.
    pub fn prune_missing(&mut self, discovered: &HashSet<String>) -> Vec<String> {
        let mut removed: Vec<String> = self
            .entries
            .keys()
            .filter(|path| !discovered.contains(*path))
            .cloned()
            .collect();
        removed.sort_unstable();
        for path in &removed {
            self.entries.remove(path);
        }
        removed
    }

    /// Count of rated entries per rating value, ascending. Unrated entries
    /// are excluded; this is the selector's view of the store.
    #[must_use]
    pub fn tier_counts(&self) -> BTreeMap<u32, u64> {
        let mut counts = BTreeMap::new();
        for rating in self.entries.values().filter_map(|r| *r) {
            *counts.entry(rating).or_insert(0) += 1;
        }
        counts
    }

    /// All paths carrying exactly `rating`, sorted.
    #[must_use]
    pub fn paths_with_rating(&self, rating: u32) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, r)| **r == Some(rating))
            .map(|(path, _)| path.as_str())
            .collect();
        paths.sort_unstable();
        paths
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<u32>)> {
        self.entries.iter().map(|(path, rating)| (path.as_str(), *rating))
    }

    /// All entries sorted by path, for listing.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&str, Option<u32>)> {
        let mut entries: Vec<(&str, Option<u32>)> = self.iter().collect();
        entries.sort_unstable_by_key(|(path, _)| *path);
        entries
    }
}
