//! Shell completion generation via clap's completion system.
//!
//! ```bash
//! # Generate bash completions
//! unrandom completion bash > ~/.local/share/bash-completion/completions/unrandom
//!
//! # Generate zsh completions
//! unrandom completion zsh > ~/.config/zsh/completions/_unrandom
//! ```

use crate::cli;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Map the CLI shell choice to clap_complete's shell type
#[must_use]
pub fn shell_to_completion_shell(shell: cli::Shell) -> CompletionShell {
    match shell {
        cli::Shell::Bash => CompletionShell::Bash,
        cli::Shell::Zsh => CompletionShell::Zsh,
        cli::Shell::Fish => CompletionShell::Fish,
        cli::Shell::PowerShell => CompletionShell::PowerShell,
        cli::Shell::Elvish => CompletionShell::Elvish,
    }
}
