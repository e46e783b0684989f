#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use scaffold_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Failure reported by the generator library.
    #[display("{}", _0)]
    Core(AppError),

    /// IO Error wrapper (terminal reads and writes).
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// The operator closed the input stream before answering a prompt.
    #[from(ignore)]
    #[display("Aborted: no answer for '{}'", _0)]
    Aborted(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
