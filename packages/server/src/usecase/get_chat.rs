//! UseCase: チャット取得（ID 指定 / ユーザーグループ指定）

use std::sync::Arc;

use crate::domain::{Chat, ChatId, ChatRepository, ChatTarget};

use super::error::ChatLookupError;

/// チャット取得のユースケース
///
/// WebSocket セッションの参加先解決にも使う。
pub struct GetChatUseCase {
    chats: Arc<dyn ChatRepository>,
}

impl GetChatUseCase {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    /// Resolve `target` to an existing chat.
    pub async fn execute(&self, target: ChatTarget) -> Result<Chat, ChatLookupError> {
        let found = match &target {
            ChatTarget::ById(id) => self.chats.get_by_id(id).await?,
            ChatTarget::ByGroupRef(group_ref) => self.chats.get_by_group_ref(*group_ref).await?,
        };
        found.ok_or(ChatLookupError::NotFound(target))
    }

    pub async fn by_id(&self, id: ChatId) -> Result<Chat, ChatLookupError> {
        self.execute(ChatTarget::ById(id)).await
    }

    pub async fn by_group_ref(&self, group_ref: i64) -> Result<Chat, ChatLookupError> {
        self.execute(ChatTarget::ByGroupRef(group_ref)).await
    }
}
