//! Durable storage for the rating store.
//!
//! One SQLite table, `files(path TEXT PRIMARY KEY, rating INTEGER)`, with a
//! `NULL` rating meaning unrated. The whole table is read into memory at
//! session start and written back wholesale after a mutation batch; there
//! is no incremental update path.
//!
//! [`save`] never writes into the live database. It builds a fresh database
//! at a temporary path next to the target and renames it into place, so a
//! crash mid-write leaves the previous valid version intact.

use crate::error::StoreError;
use crate::store::RatingStore;
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;

/// Load the full rating store from `db_path`.
///
/// A missing database file is not an error: the first session of a new
/// collection starts empty. That case is reported through the log and an
/// empty store is returned.
///
/// # Errors
///
/// [`StoreError::Corrupt`] if any persisted rating is not a positive
/// integer (or `NULL`). The load aborts on the first bad record; nothing
/// is coerced or silently dropped, and the on-disk file stays as it was.
pub fn load(db_path: &Path) -> Result<RatingStore, StoreError> {
    if !db_path.exists() {
        info!("no existing rating database at {}, starting empty", db_path.display());
        return Ok(RatingStore::new());
    }

    let conn = Connection::open(db_path)?;
    let mut stmt = conn.prepare("SELECT path, rating FROM files")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Value>(1)?))
    })?;

    let mut store = RatingStore::new();
    for row in rows {
        let (path, raw) = row?;
        let rating = match raw {
            Value::Null => None,
            Value::Integer(n) => match u32::try_from(n) {
                Ok(r) if r >= 1 => Some(r),
                _ => {
                    return Err(StoreError::Corrupt(format!(
                        "rating {n} for {path:?} is out of range"
                    )))
                }
            },
            other => {
                return Err(StoreError::Corrupt(format!(
                    "rating for {path:?} is not an integer: {other:?}"
                )))
            }
        };
        store.insert(path, rating);
    }

    debug!("loaded {} entries from {}", store.len(), db_path.display());
    Ok(store)
}

/// Persist the full store to `db_path`, replacing prior contents entirely.
///
/// The replacement database is assembled at a temporary path in the same
/// directory (same filesystem, so the final rename is atomic) and only
/// swapped in once the transaction has committed.
///
/// # Errors
///
/// Database or I/O failures; the previous database survives either way.
pub fn save(store: &RatingStore, db_path: &Path) -> Result<(), StoreError> {
    let dir = match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    let tmp = tempfile::Builder::new()
        .prefix(".ratings-")
        .suffix(".db")
        .tempfile_in(dir)?;

    let mut conn = Connection::open(tmp.path())?;
    conn.execute(
        "CREATE TABLE files (
            path   TEXT PRIMARY KEY,
            rating INTEGER
        )",
        (),
    )?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO files (path, rating) VALUES (?1, ?2)")?;
        for (path, rating) in store.iter() {
            stmt.execute(params![path, rating])?;
        }
    }
    tx.commit()?;
    drop(conn);

    tmp.persist(db_path).map_err(|e| StoreError::Io(e.error))?;
    debug!("saved {} entries to {}", store.len(), db_path.display());
    Ok(())
}
