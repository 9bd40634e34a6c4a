//! Session bootstrap.

use crate::config::ClientConfig;
use crate::engine::{NotificationSink, SyncEngine};
use crate::error::Result;
use crate::store::{NotesStore, Snapshot};
use crate::transport::{HttpNotesClient, NotesTransport};

/// One application session: an empty store, an engine bound to it, and the
/// initial load.
#[derive(Debug)]
pub struct NotesSession<T: NotesTransport, N: NotificationSink> {
    engine: SyncEngine<T, N>,
}

impl<T: NotesTransport, N: NotificationSink> NotesSession<T, N> {
    /// Create the store and run the initial load.
    ///
    /// A failed load does not fail the session; it is visible through
    /// `snapshot().error`.
    pub async fn start(transport: T, notifier: N) -> Self {
        let engine = SyncEngine::new(NotesStore::new(), transport, notifier);
        engine.load().await;
        Self { engine }
    }

    pub const fn engine(&self) -> &SyncEngine<T, N> {
        &self.engine
    }

    pub const fn store(&self) -> &NotesStore {
        self.engine.store()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.store().snapshot()
    }
}

impl<N: NotificationSink> NotesSession<HttpNotesClient, N> {
    /// Start a session against the HTTP API described by `config`.
    pub async fn connect(config: ClientConfig, notifier: N) -> Result<Self> {
        let client = HttpNotesClient::new(config)?;
        tracing::debug!(base_url = client.config().base_url(), "Starting notes session");
        Ok(Self::start(client, notifier).await)
    }
}
