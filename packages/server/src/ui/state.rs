//! Server state shared by every handler.

use std::{sync::Arc, time::Duration};

use crate::{
    domain::{ChatRepository, MessagePublisher, MessageRepository},
    infrastructure::{auth::JwtValidator, realtime::ConnectionRegistry},
};

/// Per-session settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Reject WebSocket upgrades that carry no token.
    pub require_auth: bool,
    /// Close a session after this long without an inbound frame.
    pub idle_timeout: Duration,
    /// Messages buffered per session before it is evicted as too slow.
    pub outbound_capacity: usize,
}

/// Shared application state
pub struct AppState {
    /// Chat Store（データアクセス層の抽象化）
    pub chats: Arc<dyn ChatRepository>,
    /// Message Store（データアクセス層の抽象化）
    pub messages: Arc<dyn MessageRepository>,
    /// Broadcast pipeline の入口
    pub publisher: Arc<dyn MessagePublisher>,
    /// 接続中の WebSocket セッション
    pub registry: Arc<ConnectionRegistry>,
    /// `None` when no secret is configured; supplied tokens are then rejected.
    pub jwt: Option<JwtValidator>,
    pub session: SessionSettings,
}
