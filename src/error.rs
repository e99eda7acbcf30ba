//! Error types for sbrule.

use thiserror::Error;

/// Error type for sbrule operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid extraction pattern
    #[error("regex error: {0}")]
    Pattern(#[from] regex::Error),

    /// HTTP request completed with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// HTTP transport failure (DNS, connect, TLS, read)
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is an HTTP 404.
    ///
    /// The mirror loop treats a missing remote rule-set as an expected
    /// absence rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status(404))
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Error::Status(code),
            ureq::Error::Transport(t) => Error::Transport(t.to_string()),
        }
    }
}

/// Result type alias for sbrule operations.
pub type Result<T> = std::result::Result<T, Error>;
