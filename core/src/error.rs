#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The project config file could not be read or parsed.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// The operator supplied an unusable value at a prompt.
    #[from(ignore)]
    #[display("Invalid input: {_0}")]
    Input(String),

    /// A check that must hold before anything is written failed.
    #[from(ignore)]
    #[display("Precondition failed: {_0}")]
    Precondition(String),

    /// A patch anchor is missing from the file it targets.
    #[from(ignore)]
    #[display("Anchor `{anchor}` not found in {}", file.display())]
    AnchorNotFound {
        /// File that was searched.
        file: PathBuf,
        /// Literal text that was expected.
        anchor: String,
    },

    /// No template is registered for the requested style or artifact.
    #[from(ignore)]
    #[display("Render Error: {_0}")]
    Render(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
