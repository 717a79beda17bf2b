//! # Command-Line Interface Module
//!
//! Defines the command-line interface using Clap derive macros: type-safe
//! argument parsing, generated help text, and routing-ready subcommands.
//!
//! ## Commands
//!
//! - `scan`: walk directories and merge found video files into the store
//! - `rate`: prompt for ratings on unrated entries
//! - `play`: pick a file by weighted draw and open it
//! - `list`: display every catalogued file with its rating
//! - `completion`: generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! unrandom scan ~/Videos
//! unrandom rate
//! unrandom play
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
///
/// The main structure contains only a subcommand since all functionality
/// is accessed through specific commands.
#[derive(Parser)]
#[command(name = "unrandom")]
#[command(about = "Unrandom: rating-weighted rotation for a local video collection")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Command arguments are embedded directly in the enum variants for type
/// safety and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// Scan directories and merge found files into the rating store
    ///
    /// Recursively walks the given directories (the current directory if
    /// none are given) and adds every recognized video file to the store
    /// as unrated. Files already in the store keep their rating, and files
    /// that have vanished from disk are kept too, so a rating on an
    /// unmounted drive is not lost. Pass --prune to delete such entries
    /// explicitly.
    Scan {
        /// Directories to scan
        ///
        /// Each is walked recursively. Defaults to the current directory.
        paths: Vec<PathBuf>,

        /// Maximum scan depth
        ///
        /// Limits how deep the scanner recurses below each root. 0 scans
        /// only the root directory itself.
        #[arg(long, default_value = "10")]
        scan_depth: u32,

        /// Remove entries for files no longer found by this scan
        ///
        /// Without this flag, entries for missing files are retained
        /// indefinitely. Useful after permanently reorganizing or deleting
        /// part of a collection.
        #[arg(long)]
        prune: bool,
    },

    /// Rate unrated entries interactively
    ///
    /// Walks the unrated entries in path order and asks for a rating for
    /// each. Enter a rating number, 's' (or nothing) to skip a file, and
    /// 'q' to stop; ratings entered before stopping are saved.
    Rate,

    /// Pick a file by weighted random draw and open it
    ///
    /// Higher-rated files are picked more often: each rating tier's chance
    /// is proportional to (number of files) × (configured weight), with
    /// default weights 1/4/16 for ratings 1/2/3. The file opens with the
    /// system's default handler for its type.
    Play {
        /// Print the pick without launching anything
        #[arg(long)]
        dry_run: bool,
    },

    /// List all catalogued files with their ratings
    ///
    /// Output is sorted by path; unrated entries are marked as such.
    List,

    /// Generate shell completions
    ///
    /// Usage: unrandom completion bash > ~/.local/share/bash-completion/completions/unrandom
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
