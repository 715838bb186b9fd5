//! UseCase: チャット削除
//!
//! 参加者はストア側で連鎖削除される。メッセージは残る。

use std::sync::Arc;

use crate::domain::{ChatId, ChatRepository, ChatTarget};

use super::error::ChatLookupError;

/// チャット削除のユースケース
pub struct DeleteChatUseCase {
    chats: Arc<dyn ChatRepository>,
}

impl DeleteChatUseCase {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    pub async fn execute(&self, id: ChatId) -> Result<(), ChatLookupError> {
        if self.chats.get_by_id(&id).await?.is_none() {
            return Err(ChatLookupError::NotFound(ChatTarget::ById(id)));
        }
        self.chats.delete(&id).await?;
        tracing::info!(chat_id = %id, "Chat deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chat, ChatType, MockChatRepository};

    #[tokio::test]
    async fn test_delete_existing_chat() {
        // テスト項目: 存在するチャットは削除される
        // given (前提条件):
        let chat = Chat::new(ChatType::Private, None, None).unwrap();
        let id = chat.id().clone();
        let mut chats = MockChatRepository::new();
        chats
            .expect_get_by_id()
            .returning(move |_| Ok(Some(chat.clone())));
        chats.expect_delete().times(1).returning(|_| Ok(()));
        let usecase = DeleteChatUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase.execute(id).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_chat_is_not_found() {
        // テスト項目: 存在しないチャットの削除は NotFound になり、delete は呼ばれない
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        chats.expect_get_by_id().returning(|_| Ok(None));
        chats.expect_delete().never();
        let usecase = DeleteChatUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase
            .execute(ChatId::new("missing".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChatLookupError::NotFound(_))));
    }
}
