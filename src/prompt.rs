//! Interactive rating of unrated entries.
//!
//! A plain iterative loop over a sorted snapshot of the unrated paths:
//! one prompt per file, re-prompting on bad input. Invalid input never
//! touches the store, and ending the session early (`q`, Ctrl-C, Ctrl-D)
//! is clean: whatever was rated so far is the mutation batch the caller
//! persists.

use crate::algorithm::TierWeights;
use crate::store::RatingStore;
use anyhow::{Context, Result};
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// What a single line of user input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    /// Assign this rating to the current file.
    Rate(u32),
    /// Leave the current file unrated and move on.
    Skip,
    /// Stop the session, keeping ratings entered so far.
    Quit,
    /// Not usable as-is; re-prompt with this explanation.
    Invalid(String),
}

/// Interpret one line of input against the configured tier set.
#[must_use]
pub fn parse_rating_input(line: &str, weights: &TierWeights) -> PromptAction {
    let line = line.trim();
    match line {
        "" | "s" | "skip" => PromptAction::Skip,
        "q" | "quit" | "exit" => PromptAction::Quit,
        _ => match line.parse::<u32>() {
            Ok(rating) if weights.contains(rating) => PromptAction::Rate(rating),
            Ok(rating) => PromptAction::Invalid(format!(
                "{rating} is not a configured rating (expected one of {})",
                tier_list(weights)
            )),
            Err(_) => PromptAction::Invalid(format!(
                "enter a rating ({}), 's' to skip, or 'q' to stop",
                tier_list(weights)
            )),
        },
    }
}

/// Prompt for ratings on every unrated entry in the store, in path order.
/// Returns how many entries were rated, so the caller knows whether a
/// save is due.
///
/// # Errors
///
/// Terminal I/O failures. User interruption is not an error.
pub fn rate_unrated(store: &mut RatingStore, weights: &TierWeights) -> Result<usize> {
    let pending: Vec<String> = store.unrated().iter().map(|p| (*p).to_string()).collect();
    if pending.is_empty() {
        return Ok(0);
    }

    let total = pending.len();
    println!("{total} unrated files. Rating {}, 's' skips, 'q' stops.", tier_list(weights));

    let mut rl = DefaultEditor::new().context("failed to open the terminal for input")?;
    let mut rated = 0;

    for (i, path) in pending.iter().enumerate() {
        loop {
            let line = match rl.readline(&format!("[{}/{total}] {path}: ", i + 1)) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    info!("rating session ended early, {rated} rated");
                    return Ok(rated);
                }
                Err(err) => return Err(err).context("failed to read rating input"),
            };

            match parse_rating_input(&line, weights) {
                PromptAction::Rate(rating) => {
                    store.set_rating(path, rating)?;
                    debug!("rated {path} as {rating}");
                    rated += 1;
                    break;
                }
                PromptAction::Skip => break,
                PromptAction::Quit => {
                    info!("rating session stopped, {rated} rated");
                    return Ok(rated);
                }
                PromptAction::Invalid(reason) => println!("{reason}"),
            }
        }
    }

    Ok(rated)
}

fn tier_list(weights: &TierWeights) -> String {
    weights
        .ratings()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_in_the_tier_set_rate() {
        let weights = TierWeights::default();
        assert_eq!(parse_rating_input("2", &weights), PromptAction::Rate(2));
        assert_eq!(parse_rating_input(" 3 ", &weights), PromptAction::Rate(3));
    }

    #[test]
    fn out_of_tier_numbers_are_invalid_not_skipped() {
        let weights = TierWeights::default();
        assert!(matches!(parse_rating_input("4", &weights), PromptAction::Invalid(_)));
        assert!(matches!(parse_rating_input("0", &weights), PromptAction::Invalid(_)));
    }

    #[test]
    fn non_integer_input_is_invalid() {
        let weights = TierWeights::default();
        assert!(matches!(parse_rating_input("great", &weights), PromptAction::Invalid(_)));
        assert!(matches!(parse_rating_input("2.5", &weights), PromptAction::Invalid(_)));
        assert!(matches!(parse_rating_input("-1", &weights), PromptAction::Invalid(_)));
    }

    #[test]
    fn skip_and_quit_words() {
        let weights = TierWeights::default();
        assert_eq!(parse_rating_input("", &weights), PromptAction::Skip);
        assert_eq!(parse_rating_input("s", &weights), PromptAction::Skip);
        assert_eq!(parse_rating_input("skip", &weights), PromptAction::Skip);
        assert_eq!(parse_rating_input("q", &weights), PromptAction::Quit);
        assert_eq!(parse_rating_input("quit", &weights), PromptAction::Quit);
        assert_eq!(parse_rating_input("exit", &weights), PromptAction::Quit);
    }

    #[test]
    fn invalid_message_names_the_configured_tiers() {
        let weights = TierWeights::default();
        if let PromptAction::Invalid(reason) = parse_rating_input("9", &weights) {
            assert!(reason.contains("1/2/3"), "got: {reason}");
        } else {
            panic!("expected Invalid");
        }
    }
}
