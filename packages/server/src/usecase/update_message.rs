//! UseCase: メッセージの既読更新・削除

use std::sync::Arc;

use crate::domain::{MessageId, MessageRepository};

use super::error::MessageQueryError;

/// メッセージ更新のユースケース
pub struct UpdateMessageUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl UpdateMessageUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn mark_read(
        &self,
        id: &MessageId,
        read_status: bool,
    ) -> Result<(), MessageQueryError> {
        if self.messages.get_by_id(id).await?.is_none() {
            return Err(MessageQueryError::MessageNotFound(id.as_str().to_string()));
        }
        self.messages.update_read_status(id, read_status).await?;
        Ok(())
    }

    /// Delete a message. Deleting an unknown id is not an error.
    pub async fn delete(&self, id: &MessageId) -> Result<(), MessageQueryError> {
        self.messages.delete(id).await?;
        tracing::info!(message_id = %id, "Message deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockMessageRepository, RepositoryError};

    #[tokio::test]
    async fn test_mark_read_unknown_message() {
        // テスト項目: 存在しないメッセージの既読更新は MessageNotFound
        // given (前提条件):
        let mut messages = MockMessageRepository::new();
        messages.expect_get_by_id().returning(|_| Ok(None));
        messages.expect_update_read_status().never();
        let usecase = UpdateMessageUseCase::new(Arc::new(messages));

        // when (操作):
        let result = usecase
            .mark_read(&MessageId::new("m-1".to_string()).unwrap(), true)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessageQueryError::MessageNotFound("m-1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delete_propagates_storage_error() {
        // テスト項目: 削除時のストアエラーは伝搬する
        // given (前提条件):
        let mut messages = MockMessageRepository::new();
        messages
            .expect_delete()
            .returning(|_| Err(RepositoryError::Storage("io".to_string())));
        let usecase = UpdateMessageUseCase::new(Arc::new(messages));

        // when (操作):
        let result = usecase
            .delete(&MessageId::new("m-1".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessageQueryError::Repository(RepositoryError::Storage(
                "io".to_string()
            )))
        );
    }
}
