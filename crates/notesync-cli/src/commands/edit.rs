use crate::commands::common::{merge_draft, parse_note_id, start_session};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<String>,
    content: Option<String>,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    if title.is_none() && content.is_none() {
        return Err(CliError::NothingToEdit);
    }

    let session = start_session(api_url).await?;
    let engine = session.engine();
    let existing = engine
        .fetch_by_id(&note_id)
        .await
        .map_err(CliError::from_engine)?;
    let draft = merge_draft(&existing, title, content)?;
    let note = engine
        .update(&existing.id, &draft)
        .await
        .map_err(CliError::from_engine)?;
    println!("{}", note.id);
    Ok(())
}
