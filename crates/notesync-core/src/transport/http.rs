//! HTTP client for the notes REST API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::NotesTransport;
use crate::config::{ClientConfig, REQUEST_TIMEOUT};
use crate::error::{Error, Result};
use crate::models::{Note, NoteDraft, NoteId, ShareHandle};
use crate::util::{log_excerpt, non_blank};

/// `reqwest`-backed [`NotesTransport`].
#[derive(Debug, Clone)]
pub struct HttpNotesClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpNotesClient {
    /// Builds a client with JSON headers and the fixed request timeout.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|error| Error::Config(format!("Failed to construct HTTP client: {error}")))?;
        Ok(Self { config, client })
    }

    /// Returns the configuration this client was built with.
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&NoteDraft>,
    ) -> Result<Response> {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, "Sending notes API request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|error| transport_error(&error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(
            %method,
            %url,
            status = status.as_u16(),
            body = %log_excerpt(&body),
            "Notes API request failed"
        );
        Err(remote_error(status, &body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .text()
            .await
            .map_err(|error| transport_error(&error))?;
        serde_json::from_str(&body).map_err(|error| {
            tracing::debug!(body = %log_excerpt(&body), "Undecodable notes API response");
            Error::Decode(error.to_string())
        })
    }
}

impl NotesTransport for HttpNotesClient {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self.execute(Method::GET, "/notes", None).await?;
        Self::read_json(response).await
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        let response = self.execute(Method::GET, &note_path(id), None).await?;
        Self::read_json(response).await
    }

    async fn get_shared_note(&self, id: &NoteId) -> Result<Note> {
        let path = format!("/notes/share/{}", encode_id(id));
        let response = self.execute(Method::GET, &path, None).await?;
        Self::read_json(response).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let response = self.execute(Method::POST, "/notes", Some(draft)).await?;
        Self::read_json(response).await
    }

    async fn update_note(&self, id: &NoteId, draft: &NoteDraft) -> Result<Note> {
        let response = self
            .execute(Method::PUT, &note_path(id), Some(draft))
            .await?;
        Self::read_json(response).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.execute(Method::DELETE, &note_path(id), None).await?;
        Ok(())
    }

    async fn share_note(&self, id: &NoteId) -> Result<ShareHandle> {
        let path = format!("{}/share", note_path(id));
        let response = self.execute(Method::POST, &path, None).await?;
        let body = response
            .text()
            .await
            .map_err(|error| transport_error(&error))?;
        if body.trim().is_empty() {
            return Ok(ShareHandle::for_note(id.clone()));
        }
        let payload = serde_json::from_str::<ShareResponse>(&body)
            .map_err(|error| Error::Decode(error.to_string()))?;
        Ok(payload.into_handle(id.clone()))
    }
}

/// Body of a share response. Servers differ in what they send back, so every
/// field is optional.
#[derive(Debug, Default, Deserialize)]
struct ShareResponse {
    #[serde(default, rename = "shareId", alias = "share_id")]
    share_id: Option<NoteId>,
    #[serde(default)]
    id: Option<NoteId>,
    #[serde(default, rename = "shareUrl", alias = "share_url", alias = "url")]
    share_url: Option<String>,
}

impl ShareResponse {
    fn into_handle(self, note_id: NoteId) -> ShareHandle {
        let share_id = self
            .share_id
            .or(self.id)
            .unwrap_or_else(|| note_id.clone());
        ShareHandle {
            note_id,
            share_id,
            url: non_blank(self.share_url),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn note_path(id: &NoteId) -> String {
    format!("/notes/{}", encode_id(id))
}

fn encode_id(id: &NoteId) -> String {
    urlencoding::encode(&id.canonical()).into_owned()
}

fn transport_error(error: &reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Transport(format!(
            "timeout of {}ms exceeded",
            REQUEST_TIMEOUT.as_millis()
        ))
    } else {
        Error::Transport(error.to_string())
    }
}

fn remote_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|payload| non_blank(payload.message));
    if status == StatusCode::NOT_FOUND {
        Error::NotFound { message }
    } else {
        Error::Remote {
            status: status.as_u16(),
            message,
        }
    }
}
