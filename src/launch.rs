//! Launching the selected file with the host's default handler.
//!
//! Fire-and-forget: the opener process is spawned detached and never
//! awaited, so the session does not block on the player. Launch failures
//! are reported to the caller and leave the rating store untouched.

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use std::process::{Command, Stdio};

/// Ask the host environment to open `path` with its associated handler.
///
/// # Errors
///
/// The file no longer existing (deleted or unmounted since the last scan)
/// and the opener failing to spawn are both reported; neither corrupts any
/// state.
pub fn open_file(path: &str) -> Result<()> {
    anyhow::ensure!(
        Path::new(path).exists(),
        "file not found (moved, deleted, or unmounted?): {path}"
    );

    let mut cmd = opener(path);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let child = cmd
        .spawn()
        .with_context(|| format!("failed to launch handler for {path}"))?;
    info!("launched handler (pid {}) for {path}", child.id());

    // Deliberately not waited on; the player outlives the session.
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener(path: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn opener(path: &str) -> Command {
    let mut cmd = Command::new("cmd");
    // Empty title argument so paths with spaces are not mistaken for one.
    cmd.args(["/C", "start", "", path]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(path: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
