//! Sync engine: the operations exposed to the presentation layer.
//!
//! Every transport-backed operation sets `loading` before the call and
//! settles the store with exactly one outcome transition. `load` swallows its
//! failure; every other operation records it and returns it to the caller.

use crate::error::{Error, Result};
use crate::models::{Note, NoteDraft, NoteId, ShareHandle};
use crate::store::{NotesStore, Transition};
use crate::transport::{normalize_error, NotesTransport};

pub const NOTE_CREATED_MESSAGE: &str = "Note created successfully!";
pub const NOTE_UPDATED_MESSAGE: &str = "Note updated successfully!";
pub const NOTE_DELETED_MESSAGE: &str = "Note deleted successfully!";
pub const NOTE_SHARED_MESSAGE: &str = "Share link ready!";

/// Output port for transient user notifications.
pub trait NotificationSink: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_failure(&self, message: &str);
}

/// Sink that forwards notifications to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify_success(&self, message: &str) {
        tracing::info!(target: "notesync::notify", "{}", message);
    }

    fn notify_failure(&self, message: &str) {
        tracing::error!(target: "notesync::notify", "{}", message);
    }
}

/// Keeps a [`NotesStore`] in step with the remote API.
#[derive(Debug, Clone)]
pub struct SyncEngine<T: NotesTransport, N: NotificationSink> {
    store: NotesStore,
    transport: T,
    notifier: N,
}

impl<T: NotesTransport, N: NotificationSink> SyncEngine<T, N> {
    pub const fn new(store: NotesStore, transport: T, notifier: N) -> Self {
        Self {
            store,
            transport,
            notifier,
        }
    }

    /// Store handle this engine writes to.
    pub const fn store(&self) -> &NotesStore {
        &self.store
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Replace the collection with the server's notes.
    ///
    /// Failures end up in the store's `error` and in a notification; they
    /// are never returned, so a session bootstrap cannot be aborted by them.
    pub async fn load(&self) {
        self.store.apply(Transition::SetLoading(true));
        match self.transport.list_notes().await {
            Ok(notes) => {
                tracing::info!(count = notes.len(), "Loaded notes");
                self.store.apply(Transition::SetNotes(notes));
            }
            Err(error) => {
                self.record_failure("load notes", error);
            }
        }
    }

    pub async fn create(&self, draft: &NoteDraft) -> Result<Note> {
        draft.validate()?;
        self.store.apply(Transition::SetLoading(true));
        match self.transport.create_note(draft).await {
            Ok(note) => {
                tracing::info!(id = %note.id, "Created note");
                self.store.apply(Transition::AddNote(note.clone()));
                self.notifier.notify_success(NOTE_CREATED_MESSAGE);
                Ok(note)
            }
            Err(error) => Err(self.record_failure("create note", error)),
        }
    }

    pub async fn update(&self, id: &NoteId, draft: &NoteDraft) -> Result<Note> {
        draft.validate()?;
        self.store.apply(Transition::SetLoading(true));
        match self.transport.update_note(id, draft).await {
            Ok(note) => {
                tracing::info!(id = %note.id, "Updated note");
                self.store.apply(Transition::UpdateNote(note.clone()));
                self.notifier.notify_success(NOTE_UPDATED_MESSAGE);
                Ok(note)
            }
            Err(error) => Err(self.record_failure("update note", error)),
        }
    }

    pub async fn delete(&self, id: &NoteId) -> Result<()> {
        self.store.apply(Transition::SetLoading(true));
        match self.transport.delete_note(id).await {
            Ok(()) => {
                tracing::info!(%id, "Deleted note");
                self.store.apply(Transition::DeleteNote(id.clone()));
                self.notifier.notify_success(NOTE_DELETED_MESSAGE);
                Ok(())
            }
            Err(error) => Err(self.record_failure("delete note", error)),
        }
    }

    /// Fetch one note and make it the selected note.
    pub async fn fetch_by_id(&self, id: &NoteId) -> Result<Note> {
        self.store.apply(Transition::SetLoading(true));
        match self.transport.get_note(id).await {
            Ok(note) => {
                self.store
                    .apply(Transition::SetSelectedNote(Some(note.clone())));
                self.store.apply(Transition::SetLoading(false));
                Ok(note)
            }
            Err(error) => Err(self.record_failure("load note", error)),
        }
    }

    /// Fetch a note through its share id. The selection is left alone.
    pub async fn fetch_shared(&self, id: &NoteId) -> Result<Note> {
        self.store.apply(Transition::SetLoading(true));
        match self.transport.get_shared_note(id).await {
            Ok(note) => {
                self.store.apply(Transition::SetLoading(false));
                Ok(note)
            }
            Err(error) => Err(self.record_failure("load shared note", error)),
        }
    }

    /// Ask the server for a share handle for a note.
    pub async fn share(&self, id: &NoteId) -> Result<ShareHandle> {
        self.store.apply(Transition::SetLoading(true));
        match self.transport.share_note(id).await {
            Ok(handle) => {
                tracing::info!(%id, share_id = %handle.share_id, "Shared note");
                self.store.apply(Transition::SetLoading(false));
                self.notifier.notify_success(NOTE_SHARED_MESSAGE);
                Ok(handle)
            }
            Err(error) => Err(self.record_failure("share note", error)),
        }
    }

    pub fn clear_error(&self) {
        self.store.apply(Transition::ClearError);
    }

    /// Write a failure to the store and notify it, handing the error back.
    fn record_failure(&self, action: &str, error: Error) -> Error {
        let message = normalize_error(&error);
        tracing::warn!("Failed to {}: {}", action, message);
        self.store.apply(Transition::SetError(message.clone()));
        self.notifier.notify_failure(&message);
        error
    }
}
