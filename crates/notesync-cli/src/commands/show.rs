use crate::commands::common::{parse_note_id, print_note, start_session};
use crate::error::CliError;

pub async fn run_show(id: &str, as_json: bool, api_url: Option<String>) -> Result<(), CliError> {
    let note_id = parse_note_id(id)?;
    let session = start_session(api_url).await?;
    let note = session.engine().fetch_by_id(&note_id)
        .await
        .map_err(CliError::from_engine)?;
    print_note(&note, as_json)
}
