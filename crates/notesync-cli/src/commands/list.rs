use chrono::Utc;

use crate::commands::common::{format_note_lines, note_to_list_item, start_session, NoteListItem};
use crate::error::CliError;

pub async fn run_list(as_json: bool, api_url: Option<String>) -> Result<(), CliError> {
    let session = start_session(api_url).await?;
    let snapshot = session.snapshot();
    if let Some(error) = snapshot.error {
        return Err(CliError::Reported(error));
    }

    let now = Utc::now();
    if as_json {
        let json_items = snapshot
            .notes
            .iter()
            .map(|note| note_to_list_item(note, now))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if snapshot.notes.is_empty() {
        eprintln!("No notes yet.");
    } else {
        for line in format_note_lines(&snapshot.notes, now) {
            println!("{line}");
        }
    }

    Ok(())
}
