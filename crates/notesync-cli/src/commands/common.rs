use std::io::{self, IsTerminal, Read};

use chrono::{DateTime, Utc};
use notesync_core::{
    ClientConfig, HttpNotesClient, Note, NoteDraft, NoteId, NotesSession, NotificationSink,
};
use serde::Serialize;

use crate::error::CliError;

pub type CliSession = NotesSession<HttpNotesClient, ConsoleNotifier>;

/// Prints engine notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        eprintln!("✔ {message}");
    }

    fn notify_failure(&self, message: &str) {
        eprintln!("✖ {message}");
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub relative_time: String,
}

/// Resolve the API config and start a session, which loads the note list.
pub async fn start_session(api_url: Option<String>) -> Result<CliSession, CliError> {
    let config = ClientConfig::from_env(api_url)?;
    tracing::debug!(base_url = config.base_url(), "Using notes API");
    Ok(NotesSession::connect(config, ConsoleNotifier).await?)
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    id.parse::<NoteId>().map_err(|_| CliError::EmptyNoteId)
}

pub fn format_note_lines(notes: &[Note], now: DateTime<Utc>) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let id = note.id.canonical();
            let title = truncate(note.display_title(), 30);
            let preview = note_preview(note, 40);
            let relative_time = updated_label(note, now);
            format!("{id:<8}  {title:<30}  {preview:<40}  {relative_time}")
        })
        .collect()
}

pub fn note_to_list_item(note: &Note, now: DateTime<Utc>) -> NoteListItem {
    NoteListItem {
        id: note.id.canonical(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        created_at: note.created_at.map(|at| at.to_rfc3339()),
        updated_at: note.updated_at.map(|at| at.to_rfc3339()),
        relative_time: updated_label(note, now),
    }
}

pub fn render_note(note: &Note, now: DateTime<Utc>) -> String {
    let mut rendered = format!("{}\n", note.display_title());
    if !note.content.trim().is_empty() {
        rendered.push('\n');
        rendered.push_str(note.content.trim_end());
        rendered.push('\n');
    }
    rendered.push_str(&format!(
        "\nid {}  ·  updated {}",
        note.id.canonical(),
        updated_label(note, now)
    ));
    rendered
}

pub fn print_note(note: &Note, as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("{}", render_note(note, Utc::now()));
    }
    Ok(())
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.content.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_chars)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = text.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Relative age of the last change, falling back to creation time.
pub fn updated_label(note: &Note, now: DateTime<Utc>) -> String {
    note.updated_at
        .or(note.created_at)
        .map_or_else(|| "unknown".to_string(), |at| format_relative_time(at, now))
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp).num_milliseconds();
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Draft for a new note. Content falls back to piped stdin.
pub fn resolve_new_draft(
    title: Option<String>,
    content: Option<String>,
    piped: Option<String>,
) -> NoteDraft {
    NoteDraft::new(
        title.unwrap_or_default(),
        content.or(piped).unwrap_or_default(),
    )
}

/// Overlay the given fields on an existing note.
pub fn merge_draft(
    existing: &Note,
    title: Option<String>,
    content: Option<String>,
) -> Result<NoteDraft, CliError> {
    if title.is_none() && content.is_none() {
        return Err(CliError::NothingToEdit);
    }
    let mut draft = NoteDraft::from(existing);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(content) = content {
        draft.content = content;
    }
    Ok(draft)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
