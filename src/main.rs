//! # Unrandom - Rating-Weighted Video Rotation
//!
//! Unrandom keeps a rating database over the video files in one or more
//! directories and picks what to open next with probability weighted
//! toward higher ratings.
//!
//! ## Architecture
//!
//! - `cli`: Command-line interface definitions
//! - `store`/`db`: Rating store and its SQLite persistence
//! - `algorithm`: Weighted tier selection
//! - `scan`: Recursive video file discovery
//! - `prompt`: Interactive rating loop
//! - `launch`: Handing the pick to the system's default handler
//! - `config`: Configuration and data directory management
//!
//! ## Usage
//!
//! ```bash
//! # Catalogue a collection
//! unrandom scan ~/Videos
//!
//! # Rate whatever is new
//! unrandom rate
//!
//! # Weighted pick, opened with the default player
//! unrandom play
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::info;
use std::collections::HashSet;
use std::path::PathBuf;

use unrandom::config::Config;
use unrandom::error::SelectError;
use unrandom::{algorithm, cli, completion, db, launch, prompt, scan};

/// Main entry point.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the appropriate module functions. Every mutation path follows the
/// same shape: load the store fully, apply one batch of changes, save it
/// back wholesale.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug unrandom scan` - Enable debug logging
/// - `RUST_LOG=unrandom::algorithm=trace unrandom play` - Module-specific
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = Config::load().context("failed to load configuration")?;
    let db_path = config.resolve_db_path()?;

    match args.command {
        cli::Command::Scan { paths, scan_depth, prune } => {
            run_scan(&config, &db_path, paths, scan_depth, prune)?;
        }
        cli::Command::Rate => {
            run_rate(&config, &db_path)?;
        }
        cli::Command::Play { dry_run } => {
            run_play(&config, &db_path, dry_run)?;
        }
        cli::Command::List => {
            run_list(&db_path)?;
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
    }

    Ok(())
}

/// Scan directories and reconcile the store: new files in as unrated,
/// existing ratings untouched, vanished files kept unless pruning was
/// requested.
fn run_scan(
    config: &Config,
    db_path: &std::path::Path,
    paths: Vec<PathBuf>,
    scan_depth: u32,
    prune: bool,
) -> Result<()> {
    let roots = if paths.is_empty() { vec![PathBuf::from(".")] } else { paths };
    info!("scanning {} root(s) to depth {scan_depth}", roots.len());

    let mut store = db::load(db_path).context("failed to load the rating store")?;
    let found = scan::scan_roots(&roots, &config.extensions, scan_depth)?;
    let discovered = found.len();
    let inserted = store.merge(found.iter().cloned());

    let mut pruned = 0;
    if prune {
        let keep: HashSet<String> = found.into_iter().collect();
        let removed = store.prune_missing(&keep);
        pruned = removed.len();
        for path in &removed {
            println!("pruned: {path}");
        }
    }

    db::save(&store, db_path).context("failed to save the rating store")?;

    println!(
        "{discovered} files found, {inserted} new, {pruned} pruned; {} catalogued in total",
        store.len()
    );
    if inserted > 0 {
        println!("run `unrandom rate` to rate the new files");
    }
    Ok(())
}

/// Prompt for ratings on unrated entries, saving the batch at the end.
fn run_rate(config: &Config, db_path: &std::path::Path) -> Result<()> {
    let mut store = db::load(db_path).context("failed to load the rating store")?;
    if store.unrated().is_empty() {
        println!("no unrated files; scan first, or everything is already rated");
        return Ok(());
    }

    let rated = prompt::rate_unrated(&mut store, &config.weights())?;
    if rated > 0 {
        db::save(&store, db_path).context("failed to save the rating store")?;
        println!("saved {rated} rating(s)");
    } else {
        println!("no ratings entered");
    }
    Ok(())
}

/// Weighted pick, then hand off to the platform's default handler.
fn run_play(config: &Config, db_path: &std::path::Path, dry_run: bool) -> Result<()> {
    let store = db::load(db_path).context("failed to load the rating store")?;

    let picked = match algorithm::choose_file(&store, &config.weights(), &mut rand::thread_rng()) {
        Ok(path) => path,
        Err(SelectError::NoRatedFiles) => {
            println!("nothing to play yet; `unrandom scan` and `unrandom rate` first");
            return Ok(());
        }
        Err(err) => return Err(err).context("weighted selection failed"),
    };

    let rating = store.rating(&picked).flatten().unwrap_or_default();
    println!("rating {rating}: {picked}");

    if dry_run {
        return Ok(());
    }
    launch::open_file(&picked)
}

/// Print every entry, sorted by path, with its rating.
fn run_list(db_path: &std::path::Path) -> Result<()> {
    let store = db::load(db_path).context("failed to load the rating store")?;
    if store.is_empty() {
        println!("no files catalogued; run `unrandom scan` first");
        return Ok(());
    }

    let mut rated = 0usize;
    for (path, rating) in store.sorted_entries() {
        match rating {
            Some(r) => {
                rated += 1;
                println!("{r}  {path}");
            }
            None => println!("-  {path}"),
        }
    }
    println!("{} files, {rated} rated, {} unrated", store.len(), store.len() - rated);
    Ok(())
}
