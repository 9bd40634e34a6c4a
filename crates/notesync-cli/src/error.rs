use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notesync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Nothing to change: pass --title and/or --content")]
    NothingToEdit,
    /// Already shown to the user by the console notifier; only the exit
    /// status is left to report.
    #[error("{0}")]
    Reported(String),
}

impl CliError {
    /// Wrap a failed engine operation. Input errors are returned before any
    /// notification, so only those still need printing.
    pub fn from_engine(error: notesync_core::Error) -> Self {
        match error {
            notesync_core::Error::InvalidInput(_) => Self::Core(error),
            other => Self::Reported(notesync_core::normalize_error(&other)),
        }
    }

    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }
}
