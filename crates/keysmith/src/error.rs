use thiserror::Error;

/// Errors generated by the command line.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when no password was given to check.
    #[error("no password to check, pass one as an argument or on stdin")]
    NoPassword,

    #[error(transparent)]
    Password(#[from] keysmith_password::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
