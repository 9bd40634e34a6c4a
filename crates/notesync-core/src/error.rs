//! Error types for notesync-core

use thiserror::Error;

/// Result type alias using notesync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notesync-core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request never produced a response (connect failure, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Request failed with status code {status}")]
    Remote {
        status: u16,
        /// `message` field of the response body, when present
        message: Option<String>,
    },

    /// The server does not know the requested note
    #[error("Request failed with status code 404")]
    NotFound { message: Option<String> },

    /// A success response whose body could not be decoded
    #[error("Invalid response payload: {0}")]
    Decode(String),

    /// Rejected on the client before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Structured message carried by a remote failure, if the server sent one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message, .. } | Self::NotFound { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether this failure means the requested note does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status of a remote failure.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}
