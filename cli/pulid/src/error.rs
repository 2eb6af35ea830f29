//! Error handling and display for the CLI.

use colored::Colorize;
use pulid::PulidError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to generate ID: {0}")]
    Generate(#[from] PulidError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(CliError::Generate(e)) = err.downcast_ref::<CliError>() {
        if matches!(e, PulidError::EntropyExhausted) {
            eprintln!(
                "\n{}",
                "Hint: Too many IDs were requested within one millisecond. Retry the command."
                    .yellow()
            );
        }
    }
}
