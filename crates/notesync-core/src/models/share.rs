//! Share handle model

use serde::{Deserialize, Serialize};

use super::note::NoteId;

/// Read-only access handle for a note, minted by the share endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareHandle {
    /// Note the handle was requested for
    pub note_id: NoteId,
    /// Id to pass to the shared-note endpoint
    pub share_id: NoteId,
    /// Absolute link, when the server provides one
    pub url: Option<String>,
}

impl ShareHandle {
    /// Handle for a server that shares notes under their own id.
    pub fn for_note(note_id: NoteId) -> Self {
        Self {
            share_id: note_id.clone(),
            note_id,
            url: None,
        }
    }

    /// Route under which the shared note is readable.
    pub fn path(&self) -> String {
        format!("/share/{}", urlencoding::encode(&self.share_id.canonical()))
    }

    /// Server-provided link, or the share route when there is none.
    pub fn link(&self) -> String {
        self.url.clone().unwrap_or_else(|| self.path())
    }
}
