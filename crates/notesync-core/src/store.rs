//! Client-side note state.
//!
//! [`Snapshot`] is the value observed by the presentation layer. It only
//! changes through the closed set of [`Transition`]s, applied one at a time
//! by [`NotesStore::apply`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::{same_id, Note, NoteId};

/// Synchronized state exposed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Notes in server order; created notes are prepended
    pub notes: Vec<Note>,
    /// True while any request is in flight
    pub loading: bool,
    /// Last normalized error message
    pub error: Option<String>,
    /// Most recently fetched single note
    pub selected_note: Option<Note>,
}

/// A named state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    SetLoading(bool),
    SetError(String),
    SetNotes(Vec<Note>),
    AddNote(Note),
    UpdateNote(Note),
    DeleteNote(NoteId),
    SetSelectedNote(Option<Note>),
    ClearError,
}

impl Transition {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
            Self::SetNotes(_) => "set_notes",
            Self::AddNote(_) => "add_note",
            Self::UpdateNote(_) => "update_note",
            Self::DeleteNote(_) => "delete_note",
            Self::SetSelectedNote(_) => "set_selected_note",
            Self::ClearError => "clear_error",
        }
    }
}

impl Snapshot {
    /// Apply one transition, producing the next snapshot.
    #[must_use]
    pub fn apply(mut self, transition: Transition) -> Self {
        match transition {
            Transition::SetLoading(loading) => {
                self.loading = loading;
            }
            Transition::SetError(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            Transition::SetNotes(notes) => {
                self.notes = notes;
                self.settled();
            }
            Transition::AddNote(note) => {
                // Keep ids unique if the server hands back a note we already hold.
                self.notes.retain(|existing| !same_id(&existing.id, &note.id));
                self.notes.insert(0, note);
                self.settled();
            }
            Transition::UpdateNote(note) => {
                if let Some(slot) = self
                    .notes
                    .iter_mut()
                    .find(|existing| same_id(&existing.id, &note.id))
                {
                    *slot = note;
                }
                self.settled();
            }
            Transition::DeleteNote(id) => {
                self.notes.retain(|existing| !same_id(&existing.id, &id));
                if self
                    .selected_note
                    .as_ref()
                    .is_some_and(|selected| same_id(&selected.id, &id))
                {
                    self.selected_note = None;
                }
                self.settled();
            }
            Transition::SetSelectedNote(note) => {
                self.selected_note = note;
            }
            Transition::ClearError => {
                self.error = None;
            }
        }
        self
    }

    fn settled(&mut self) {
        self.error = None;
        self.loading = false;
    }
}

/// Shared handle to the session's note state.
///
/// Cloning the handle shares the same underlying state. Subscribers are
/// notified after every applied transition.
#[derive(Debug, Clone)]
pub struct NotesStore {
    sender: Arc<watch::Sender<Snapshot>>,
}

impl NotesStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Snapshot::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply a transition and return the resulting snapshot.
    pub fn apply(&self, transition: Transition) -> Snapshot {
        tracing::debug!(transition = transition.name(), "Applying store transition");
        let mut next = None;
        self.sender.send_modify(|snapshot| {
            let current = std::mem::take(snapshot);
            *snapshot = current.apply(transition);
            next = Some(snapshot.clone());
        });
        next.unwrap_or_else(|| self.snapshot())
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.sender.borrow().clone()
    }

    /// Receiver that observes every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.sender.borrow().notes.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.sender.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.sender.borrow().error.clone()
    }

    pub fn selected_note(&self) -> Option<Note> {
        self.sender.borrow().selected_note.clone()
    }
}

impl Default for NotesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn note(id: impl Into<NoteId>, title: &str) -> Note {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Note {
            id: id.into(),
            title: title.to_string(),
            content: String::new(),
            created_at: Some(at),
            updated_at: Some(at),
        }
    }

    fn titles(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.notes.iter().map(|n| n.title.as_str()).collect()
    }

    fn with_notes(notes: Vec<Note>) -> Snapshot {
        Snapshot::default().apply(Transition::SetNotes(notes))
    }

    #[test]
    fn set_loading_leaves_other_fields() {
        let mut snapshot = with_notes(vec![note(1, "A")]);
        snapshot.error = Some("old".to_string());
        let next = snapshot.clone().apply(Transition::SetLoading(true));
        assert!(next.loading);
        assert_eq!(next.error.as_deref(), Some("old"));
        assert_eq!(next.notes, snapshot.notes);
    }

    #[test]
    fn set_error_stops_loading() {
        let snapshot = Snapshot::default()
            .apply(Transition::SetLoading(true))
            .apply(Transition::SetError("offline".to_string()));
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error.as_deref(), Some("offline"));
    }

    #[test]
    fn set_notes_replaces_without_merging() {
        let snapshot = with_notes(vec![note(1, "A"), note(2, "B")])
            .apply(Transition::SetError("stale".to_string()))
            .apply(Transition::SetLoading(true))
            .apply(Transition::SetNotes(vec![note(3, "C")]));
        assert_eq!(titles(&snapshot), vec!["C"]);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
    }

    #[test]
    fn add_note_prepends() {
        let snapshot = with_notes(vec![note(1, "A")]).apply(Transition::AddNote(note(2, "B")));
        assert_eq!(titles(&snapshot), vec!["B", "A"]);
    }

    #[test]
    fn add_note_with_known_id_keeps_ids_unique() {
        let snapshot = with_notes(vec![note(1, "A"), note(2, "B")])
            .apply(Transition::AddNote(note("2", "B2")));
        assert_eq!(titles(&snapshot), vec!["B2", "A"]);
    }

    #[test]
    fn update_note_replaces_in_place() {
        let snapshot = with_notes(vec![note(1, "A"), note(2, "B"), note(3, "C")])
            .apply(Transition::SetLoading(true))
            .apply(Transition::UpdateNote(note("2", "B2")));
        assert_eq!(titles(&snapshot), vec!["A", "B2", "C"]);
        assert!(!snapshot.loading);
    }

    #[test]
    fn update_unknown_note_changes_nothing() {
        let before = with_notes(vec![note(1, "A")]);
        let after = before.clone().apply(Transition::UpdateNote(note(9, "Z")));
        assert_eq!(after.notes, before.notes);
    }

    #[test]
    fn delete_matches_numeric_id_with_text_payload() {
        let snapshot = with_notes(vec![note(42, "A"), note(7, "B")])
            .apply(Transition::DeleteNote(NoteId::from("42")));
        assert_eq!(titles(&snapshot), vec!["B"]);
    }

    #[test]
    fn delete_twice_is_idempotent() {
        let once = with_notes(vec![note(1, "A"), note(2, "B")])
            .apply(Transition::DeleteNote(NoteId::from(1)));
        let twice = once.clone().apply(Transition::DeleteNote(NoteId::from(1)));
        assert_eq!(twice.notes, once.notes);
    }

    #[test]
    fn delete_clears_matching_selected_note() {
        let snapshot = with_notes(vec![note(1, "A")])
            .apply(Transition::SetSelectedNote(Some(note(1, "A"))))
            .apply(Transition::DeleteNote(NoteId::from("1")));
        assert_eq!(snapshot.selected_note, None);
        assert!(snapshot.notes.is_empty());
    }

    #[test]
    fn delete_keeps_unrelated_selected_note() {
        let snapshot = with_notes(vec![note(1, "A"), note(2, "B")])
            .apply(Transition::SetSelectedNote(Some(note(2, "B"))))
            .apply(Transition::DeleteNote(NoteId::from(1)));
        assert_eq!(snapshot.selected_note, Some(note(2, "B")));
    }

    #[test]
    fn selected_note_and_clear_error_touch_one_field() {
        let mut base = with_notes(vec![note(1, "A")]);
        base.loading = true;
        base.error = Some("boom".to_string());

        let selected = base
            .clone()
            .apply(Transition::SetSelectedNote(Some(note(1, "A"))));
        assert!(selected.loading);
        assert_eq!(selected.error.as_deref(), Some("boom"));

        let cleared = base.clone().apply(Transition::ClearError);
        assert_eq!(cleared.error, None);
        assert!(cleared.loading);
    }

    #[test]
    fn mixed_sequences_never_duplicate_ids() {
        let steps = vec![
            Transition::AddNote(note(1, "A")),
            Transition::AddNote(note("1", "A again")),
            Transition::AddNote(note(2, "B")),
            Transition::UpdateNote(note("2", "B2")),
            Transition::DeleteNote(NoteId::from(1)),
            Transition::AddNote(note(1, "A3")),
            Transition::AddNote(note("3", "C")),
            Transition::UpdateNote(note(3, "C2")),
        ];
        let snapshot = steps
            .into_iter()
            .fold(Snapshot::default(), Snapshot::apply);

        let mut ids: Vec<String> = snapshot.notes.iter().map(|n| n.id.canonical()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(titles(&snapshot), vec!["C2", "A3", "B2"]);
    }

    #[test]
    fn store_handle_shares_state_and_notifies_subscribers() {
        let store = NotesStore::new();
        let mut receiver = store.subscribe();
        let other = store.clone();

        let applied = other.apply(Transition::AddNote(note(1, "A")));
        assert_eq!(titles(&applied), vec!["A"]);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(titles(&receiver.borrow_and_update()), vec!["A"]);
        assert_eq!(store.notes().len(), 1);
        assert!(!store.is_loading());
    }
}
