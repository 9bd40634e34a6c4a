//! Data models for notesync

mod note;
mod share;

pub use note::{parse_timestamp, same_id, Note, NoteDraft, NoteId};
pub use share::ShareHandle;
