//! Shared helpers for client integration tests

#![allow(dead_code)]

use cockpit_core::{KeyValueStorage, MemoryStorage};
use cockpit_http::{AuthenticatedClient, Notifier, PublicClient, SessionStore, TypedClientBuilder};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

/// Notifier that remembers every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<SessionStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub client: AuthenticatedClient,
    pub public: PublicClient,
}

impl Harness {
    pub async fn start() -> Self {
        Self::with_token(None).await
    }

    pub async fn with_token(token: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        if let Some(token) = token {
            storage.set_item("admin_token", token).unwrap();
        }
        let session = Arc::new(SessionStore::load(storage.clone()).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());

        let client = builder(&server, notifier.clone())
            .build_authenticated(session.clone())
            .unwrap();
        let public = builder(&server, notifier.clone()).build_public().unwrap();

        Self {
            server,
            storage,
            session,
            notifier,
            client,
            public,
        }
    }
}

pub fn builder(server: &MockServer, notifier: Arc<RecordingNotifier>) -> TypedClientBuilder {
    TypedClientBuilder::new()
        .base_url(format!("{}/api", server.uri()))
        .timeout(Duration::from_secs(2))
        .notifier(notifier)
}
