//! Error types for extool-core.

use thiserror::Error;

/// Result type alias using extool-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for extool operations.
///
/// Conditions that merely end an operation early (a dismissed prompt, a stale
/// selection, an empty collection) are not errors; see
/// [`Outcome`](crate::controller::Outcome).
#[derive(Error, Debug)]
pub enum Error {
    // Settings persistence
    #[error("Failed to persist settings: {0}")]
    Persistence(String),

    // Terminal session errors
    #[error("tmux not found. Install tmux to run external tools.")]
    TmuxNotFound,

    #[error("tmux error: {0}")]
    Tmux(String),

    #[error("Terminal session is gone: {0}")]
    StaleSession(String),

    // Prompt provider errors
    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Persistence(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Persistence(e.to_string())
    }
}
