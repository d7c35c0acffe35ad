//! Session fixtures
//!
//! Builds `ChatSession` instances wired to shared in-memory state so
//! integration tests can drive the realtime protocol as a set of
//! concurrent clients without opening sockets.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use opencircle::backend::presence::{ConnectionHandle, PresenceBroadcaster, PresenceRegistry};
use opencircle::backend::ws::{ChatSession, ServerEvent};

use crate::common::fakes::{InMemoryMessageStore, InMemoryProfileStore};

/// Shared backend state for a multi-client scenario
pub struct Harness {
    pub registry: Arc<PresenceRegistry>,
    pub broadcaster: PresenceBroadcaster,
    pub messages: Arc<InMemoryMessageStore>,
    pub profiles: Arc<InMemoryProfileStore>,
}

/// One simulated client: a session plus the queue its socket would drain
pub struct Client {
    pub session: ChatSession,
    pub rx: mpsc::UnboundedReceiver<ServerEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(PresenceRegistry::new()),
            broadcaster: PresenceBroadcaster::new(),
            messages: Arc::new(InMemoryMessageStore::new()),
            profiles: Arc::new(InMemoryProfileStore::new()),
        }
    }

    /// Connect a new client (no join yet)
    pub fn connect(&self) -> Client {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::new(tx);
        let session = ChatSession::new(
            self.registry.clone(),
            self.broadcaster.clone(),
            Some(self.messages.clone()),
            Some(self.profiles.clone()),
            handle,
        );
        Client { session, rx }
    }

    /// Connect and immediately join as the given user
    pub async fn join(&self, user_id: Uuid) -> Client {
        let mut client = self.connect();
        client.session.on_join(&user_id.to_string()).await;
        client
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Drain everything queued for this client so far
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
