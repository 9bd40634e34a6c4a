use crate::commands::common::{parse_note_id, start_session};
use crate::error::CliError;

pub async fn run_share(id: &str, api_url: Option<String>) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = start_session(api_url).await?;
    let handle = session.engine().share(&note_id)
        .await
        .map_err(CliError::from_engine)?;
    println!("{}", handle.link());
    Ok(())
}
