//! 接続中セッションのレジストリ
//!
//! WebSocket セッションごとの送信チャンネルを保持し、チャット単位で
//! メッセージを配信（fan-out）します。
//!
//! - 登録・削除は書き込みロック、配信はスナップショットを取ってから行う
//! - ロックを保持したまま送信しない
//! - 送信に失敗したセッション、送信バッファが満杯のセッションはその場で登録解除する

use std::{collections::HashMap, fmt, sync::Arc};

use tokio::sync::{
    RwLock,
    mpsc::{Sender, error::TrySendError},
};
use uuid::Uuid;

use crate::{
    domain::{ChatId, Message},
    infrastructure::dto::websocket::MessageDto,
};

/// Identity of one live connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered session: the chat it is bound to and its bounded outbound channel.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: SessionId,
    pub chat_id: ChatId,
    pub outbound: Sender<String>,
}

impl SessionHandle {
    pub fn new(chat_id: ChatId, outbound: Sender<String>) -> Self {
        Self {
            id: SessionId::generate(),
            chat_id,
            outbound,
        }
    }
}

/// Outcome of one fan-out pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanOutReport {
    /// Sessions bound to the message's chat at snapshot time
    pub attempted: usize,
    pub delivered: usize,
    /// Sessions removed because their channel was closed or full
    pub evicted: usize,
}

/// Live sessions keyed by session id
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn add(&self, handle: SessionHandle) {
        let mut sessions = self.sessions.write().await;
        tracing::debug!(session_id = %handle.id, chat_id = %handle.chat_id, "Session registered");
        sessions.insert(handle.id, handle);
    }

    /// Remove a session. Returns `false` when it was already gone.
    pub async fn remove(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Session unregistered");
        }
        removed
    }

    pub async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Point-in-time copy of all registered sessions.
    pub async fn snapshot(&self) -> Vec<SessionHandle> {
        self.sessions.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Deliver `message` to every session bound to its chat.
    ///
    /// The payload is serialized once and never awaited on a session. A
    /// session whose channel is closed, or full because its socket stopped
    /// draining, is evicted after the pass; the others still receive the message.
    pub async fn fan_out(&self, message: &Message) -> FanOutReport {
        let payload = match serde_json::to_string(&MessageDto::from(message)) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(message_id = %message.id(), "Failed to serialize message: {}", e);
                return FanOutReport::default();
            }
        };

        let targets: Vec<SessionHandle> = self
            .snapshot()
            .await
            .into_iter()
            .filter(|handle| &handle.chat_id == message.chat_id())
            .collect();

        let mut report = FanOutReport {
            attempted: targets.len(),
            ..FanOutReport::default()
        };
        let mut failed = Vec::new();
        for handle in &targets {
            match handle.outbound.try_send(payload.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        session_id = %handle.id,
                        "Outbound buffer is full, evicting session"
                    );
                    failed.push(handle.id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!(
                        session_id = %handle.id,
                        "Session channel is closed, evicting session"
                    );
                    failed.push(handle.id);
                }
            }
        }

        for id in failed {
            if self.remove(&id).await {
                report.evicted += 1;
            }
        }

        report
    }
}
