//! notesync-core - Core library for notesync
//!
//! This crate keeps an in-memory note collection synchronized with a remote
//! notes API. It contains the shared models, the state store, the HTTP
//! transport and the sync engine used by every notesync front end.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
pub mod transport;
pub mod util;

pub use config::ClientConfig;
pub use engine::{NotificationSink, SyncEngine, TracingNotifier};
pub use error::{Error, Result};
pub use models::{same_id, Note, NoteDraft, NoteId, ShareHandle};
pub use session::NotesSession;
pub use store::{NotesStore, Snapshot, Transition};
pub use transport::{normalize_error, HttpNotesClient, NotesTransport};
