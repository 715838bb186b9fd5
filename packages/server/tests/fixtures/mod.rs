//! Shared helpers for the integration tests.
//!
//! Each test gets its own server on an ephemeral port backed by a private
//! in-memory SQLite database.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use chathub_server::{
    domain::{ChatId, IdFactory, MessageContent, MessageDraft, MessageRepository as _, UserId},
    infrastructure::{
        auth::{JwtValidator, issue_token},
        realtime::{BroadcastPipeline, ConnectionRegistry, PipelineConsumer},
        repository::{SqliteChatRepository, SqliteMessageRepository, sqlite::connect_in_memory},
    },
    ui::{
        build_state, serve,
        state::{AppState, SessionSettings},
    },
};
use chrono::{DateTime, Utc};
use tokio::{net::TcpListener, sync::oneshot};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    shutdown: Option<oneshot::Sender<()>>,
    /// Pipeline consumer that has not been started yet.
    stalled_consumer: Option<PipelineConsumer>,
}

impl TestServer {
    /// Server that accepts connections without a token.
    pub async fn start() -> Self {
        Self::start_with(SessionSettings {
            require_auth: false,
            idle_timeout: Duration::from_secs(300),
            outbound_capacity: 64,
        })
        .await
    }

    pub async fn start_with(session: SessionSettings) -> Self {
        let pool = connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        let jwt = Some(JwtValidator::new(TEST_SECRET.as_bytes()));
        let (state, _consumer) = build_state(pool, jwt, session, 256);
        Self::serve_state(state, None).await
    }

    /// Server whose broadcast pipeline holds `queue_capacity` drafts and is
    /// not consumed until [`TestServer::start_pipeline`] is called.
    pub async fn start_with_stalled_pipeline(queue_capacity: usize) -> Self {
        let pool = connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        let messages = Arc::new(SqliteMessageRepository::new(pool.clone()));
        let registry = ConnectionRegistry::new();
        let (pipeline, consumer) =
            BroadcastPipeline::new(queue_capacity, messages.clone(), registry.clone());
        let state = Arc::new(AppState {
            chats: Arc::new(SqliteChatRepository::new(pool)),
            messages,
            publisher: Arc::new(pipeline),
            registry,
            jwt: None,
            session: SessionSettings {
                require_auth: false,
                idle_timeout: Duration::from_secs(300),
                outbound_capacity: 64,
            },
        });
        Self::serve_state(state, Some(consumer)).await
    }

    /// Start the consumer held back by [`TestServer::start_with_stalled_pipeline`].
    pub fn start_pipeline(&mut self) {
        let consumer = self
            .stalled_consumer
            .take()
            .expect("pipeline is already running");
        tokio::spawn(consumer.run());
    }

    async fn serve_state(state: Arc<AppState>, stalled_consumer: Option<PipelineConsumer>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let (shutdown, signal) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, state.clone(), async move {
            let _ = signal.await;
        }));

        Self {
            addr,
            state,
            shutdown: Some(shutdown),
            stalled_consumer,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    /// Create a chat through the REST API and return its JSON.
    pub async fn create_chat(&self, body: serde_json::Value) -> serde_json::Value {
        let response = reqwest::Client::new()
            .post(format!("{}/api/chats", self.base_url()))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201, "chat creation failed");
        response.json().await.expect("Failed to parse JSON")
    }

    /// Store a message directly, bypassing the socket.
    pub async fn seed_message(
        &self,
        chat_id: &str,
        sender_id: &str,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> String {
        let message = MessageDraft::new(
            ChatId::new(chat_id.to_string()).unwrap(),
            UserId::new(sender_id.to_string()).unwrap(),
            MessageContent::new(content.to_string()).unwrap(),
            created_at,
        )
        .into_message(IdFactory::message_id());
        self.state
            .messages
            .create(&message)
            .await
            .expect("Failed to seed message");
        message.id().as_str().to_string()
    }

    /// Wait until `count` sessions are registered.
    pub async fn wait_for_sessions(&self, count: usize) {
        for _ in 0..200 {
            if self.state.registry.len().await == count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {count} registered sessions");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub fn token_for(user_id: &str) -> String {
    issue_token(TEST_SECRET.as_bytes(), user_id, 3600).expect("Failed to sign token")
}
