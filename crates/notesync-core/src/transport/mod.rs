//! Transport layer for the notes API.
//!
//! [`NotesTransport`] has one method per REST endpoint. [`HttpNotesClient`]
//! is the production implementation; tests substitute their own.

mod http;

use std::future::Future;

use crate::error::{Error, Result};
use crate::models::{Note, NoteDraft, NoteId, ShareHandle};
use crate::util::first_non_blank;

pub use http::HttpNotesClient;

/// Message shown when a failure carries nothing more specific.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Remote notes API.
pub trait NotesTransport: Send + Sync {
    /// `GET /notes`
    fn list_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// `GET /notes/:id`
    fn get_note(&self, id: &NoteId) -> impl Future<Output = Result<Note>> + Send;

    /// `GET /notes/share/:id`
    fn get_shared_note(&self, id: &NoteId) -> impl Future<Output = Result<Note>> + Send;

    /// `POST /notes`
    fn create_note(&self, draft: &NoteDraft) -> impl Future<Output = Result<Note>> + Send;

    /// `PUT /notes/:id`
    fn update_note(
        &self,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> impl Future<Output = Result<Note>> + Send;

    /// `DELETE /notes/:id`
    fn delete_note(&self, id: &NoteId) -> impl Future<Output = Result<()>> + Send;

    /// `POST /notes/:id/share`
    fn share_note(&self, id: &NoteId) -> impl Future<Output = Result<ShareHandle>> + Send;
}

/// Turn any failure into the message shown to the user.
///
/// Tries the structured `message` sent by the server, then the error's own
/// description, then a generic fallback. The result is never empty.
pub fn normalize_error(error: &Error) -> String {
    first_non_blank([
        error.remote_message().map(ToString::to_string),
        Some(error.to_string()),
    ])
    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prefers_remote_message() {
        let error = Error::NotFound {
            message: Some("Note not found".to_string()),
        };
        assert_eq!(normalize_error(&error), "Note not found");
    }

    #[test]
    fn normalize_uses_description_without_remote_message() {
        let error = Error::Remote {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(
            normalize_error(&error),
            "Request failed with status code 500"
        );
        assert_eq!(
            normalize_error(&Error::Transport("timeout of 15000ms exceeded".to_string())),
            "timeout of 15000ms exceeded"
        );
    }

    #[test]
    fn normalize_falls_back_for_blank_descriptions() {
        assert_eq!(
            normalize_error(&Error::Transport(String::new())),
            FALLBACK_ERROR_MESSAGE
        );
    }
}
