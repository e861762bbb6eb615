use std::path::PathBuf;
use thiserror::Error;

/// Errors generated by the password library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when caller supplied requirements are
    /// inconsistent or have the wrong shape.
    #[error("malformed requirements: {0}")]
    MalformedRequirements(String),

    /// Error generated parsing an unknown password class name.
    #[error("unknown password class '{0}'")]
    UnknownClass(String),

    /// Error generated when the secure random source keeps failing.
    #[error("secure random source unavailable after {attempts} attempt(s)")]
    RandomSourceUnavailable {
        /// Number of consecutive failed fill requests.
        attempts: usize,
    },

    /// Error generated when no candidate satisfied the requirements
    /// within the attempt budget.
    #[error("no acceptable password after {attempts} attempt(s)")]
    GenerationExhausted {
        /// Number of candidates drawn and rejected.
        attempts: usize,
    },

    /// Error generated when a path is not a file.
    #[error("path {0} is not a file")]
    NotFile(PathBuf),

    /// Error generated by the io module.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error generated parsing TOML configuration.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedRequirements(reason.into())
    }
}
