use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Error when executing Git commands
    #[error("git command failed: {0}")]
    GitCommand(String),
    /// Git executable could not be started
    #[error("git not found on PATH")]
    GitNotInstalled,
    /// Error when a profile key is not in the store.
    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },
    /// Name or email missing after argument and prompt resolution.
    #[error("name and email are required")]
    MissingInput,
    /// Home directory cannot be resolved
    #[error("failed to find the home directory")]
    NoHomeDir,
}
