use crate::commands::common::{read_piped_stdin, resolve_new_draft, start_session};
use crate::error::CliError;

pub async fn run_add(
    title: Option<String>,
    content: Option<String>,
    api_url: Option<String>,
) -> Result<(), CliError> {
    let piped = if content.is_none() {
        read_piped_stdin()?
    } else {
        None
    };
    let draft = resolve_new_draft(title, content, piped);
    draft.validate()?;

    let session = start_session(api_url).await?;
    let note = session.engine().create(&draft)
        .await
        .map_err(CliError::from_engine)?;
    println!("{}", note.id);
    Ok(())
}
