//! Rating-weighted rotation for a local video collection.
//!
//! Unrandom catalogues the video files under one or more directories,
//! lets the user attach an integer rating to each, and then picks what to
//! play with probability weighted toward higher ratings: "random, but
//! not really".
//!
//! Core modules:
//! - [`store`] - In-memory rating store and rescan reconciliation
//! - [`db`] - SQLite persistence: full load, atomic full replace on save
//! - [`algorithm`] - Weighted tier selection and the in-tier uniform draw
//! - [`scan`] - Recursive, depth-limited discovery of video files
//!
//! ### Supporting Modules
//!
//! - [`config`] - Data directory management and the optional config file
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`prompt`] - Interactive rating loop
//! - [`launch`] - Opening the pick with the host's default handler
//! - [`error`] - Typed store and selector errors
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use unrandom::algorithm::{self, TierWeights};
//! use unrandom::{db, scan};
//!
//! // Fold a directory scan into the persisted store.
//! let db_path = Path::new("/home/user/.local/share/unrandom/ratings.db");
//! let mut store = db::load(db_path)?;
//! let found = scan::scan_roots(&[PathBuf::from("/videos")], &scan::DEFAULT_EXTENSIONS, 10)?;
//! store.merge(found);
//! db::save(&store, db_path)?;
//!
//! // Weighted pick: with the default 1/4/16 weights, a file rated 3 comes
//! // up sixteen times as often as a file rated 1.
//! let picked = algorithm::choose_file(&store, &TierWeights::default(), &mut rand::thread_rng())?;
//! println!("{picked}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Selection Semantics
//!
//! Selection is a two-stage draw. Tiers are weighted by
//! `count × weight` (their *mass*); a single integer drawn from the closed
//! interval `[1, total_mass]` is resolved against cumulative masses in
//! ascending rating order, which makes each tier's probability exactly
//! `mass / total_mass`. The file is then drawn uniformly within the tier.
//! Unrated files carry no mass and are never selected.
//!
//! ## Error Handling
//!
//! Store and selector failures are typed ([`error::StoreError`],
//! [`error::SelectError`]); the binary keeps `anyhow::Result` at the
//! boundary and turns [`error::SelectError::NoRatedFiles`] into a plain
//! "nothing to play yet" message. Logging goes through `log`/`env_logger`
//! and is controlled with `RUST_LOG`.

pub mod algorithm;
pub mod cli;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod launch;
pub mod prompt;
pub mod scan;
pub mod store;
