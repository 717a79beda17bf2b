//! Typed errors for the rating store and the weighted selector.
//!
//! The interactive layer decides whether to retry, skip, or abort;
//! these types only say what went wrong.

use thiserror::Error;

/// Errors from loading, mutating, or persisting the rating store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An operation referenced a path that is not a key in the store.
    #[error("no entry for path: {0}")]
    NotFound(String),

    /// The persisted database could not be parsed. The load aborts as a
    /// whole; the on-disk file is left untouched for inspection.
    #[error("corrupt rating store: {0}")]
    Corrupt(String),

    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem failure while swapping the database into place.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from weighted selection.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    /// Every entry is unrated (or no rating has a configured weight), so
    /// the total selection mass is zero. Surfaced to the user as
    /// "nothing to play yet", never as a crash.
    #[error("no rated files to select from")]
    NoRatedFiles,

    /// The chosen tier turned out to hold no files. Unreachable when tier
    /// masses are computed from actual counts; indicates a bookkeeping bug.
    #[error("selected tier {0} contains no files")]
    EmptyTier(u32),

    /// The cumulative walk ran out of tiers below the drawn value.
    /// Unreachable when the draw is bounded by the summed mass.
    #[error("draw {draw} exceeded accumulated mass {total}")]
    MassMismatch { draw: u64, total: u64 },
}
