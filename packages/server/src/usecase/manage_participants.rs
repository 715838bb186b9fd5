//! UseCase: チャット参加者の一覧・追加・削除
//!
//! 追加時の検証順序:
//! 1. user_id の有無
//! 2. チャットの存在
//! 3. role / status の妥当性
//! 4. 重複参加

use std::sync::Arc;

use crate::domain::{ChatId, ChatParticipant, ChatRepository, RepositoryError, UserId};

use super::error::ParticipantError;

/// Input of [`ManageParticipantsUseCase::add`]
#[derive(Debug, Clone, Default)]
pub struct NewParticipant {
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

/// 参加者管理のユースケース
pub struct ManageParticipantsUseCase {
    chats: Arc<dyn ChatRepository>,
}

impl ManageParticipantsUseCase {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    /// Participants of a chat, oldest join first.
    pub async fn list(&self, chat_id: &ChatId) -> Result<Vec<ChatParticipant>, ParticipantError> {
        self.ensure_chat(chat_id).await?;
        self.chats
            .list_participants(chat_id)
            .await
            .map_err(ParticipantError::Repository)
    }

    pub async fn add(
        &self,
        chat_id: &ChatId,
        input: NewParticipant,
    ) -> Result<ChatParticipant, ParticipantError> {
        let user_id = input
            .user_id
            .filter(|user_id| !user_id.is_empty())
            .ok_or(ParticipantError::MissingUserId)?;

        self.ensure_chat(chat_id).await?;

        let participant = ChatParticipant::new(
            chat_id.as_str().to_string(),
            user_id,
            input.role.as_deref().unwrap_or_default(),
            input.status.as_deref().unwrap_or_default(),
        )?;

        let already = self
            .chats
            .is_participant(chat_id, participant.user_id())
            .await
            .map_err(ParticipantError::Repository)?;
        if already {
            return Err(ParticipantError::AlreadyParticipant(
                participant.user_id().as_str().to_string(),
            ));
        }

        let user_id = participant.user_id().as_str().to_string();
        match self.chats.add_participant(participant).await {
            Ok(added) => {
                tracing::info!(chat_id = %chat_id, user_id = %added.user_id(), "Participant added");
                Ok(added)
            }
            // Lost a race against a concurrent insert of the same user.
            Err(RepositoryError::Conflict(_)) => Err(ParticipantError::AlreadyParticipant(user_id)),
            Err(e) => Err(ParticipantError::Repository(e)),
        }
    }

    /// Remove a user from a chat. Removing a non-member is not an error.
    pub async fn remove(&self, chat_id: &ChatId, user_id: String) -> Result<(), ParticipantError> {
        let user_id = UserId::new(user_id)?;
        self.chats
            .remove_participant(chat_id, &user_id)
            .await
            .map_err(ParticipantError::Repository)?;
        tracing::info!(chat_id = %chat_id, user_id = %user_id, "Participant removed");
        Ok(())
    }

    async fn ensure_chat(&self, chat_id: &ChatId) -> Result<(), ParticipantError> {
        match self.chats.get_by_id(chat_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(ParticipantError::ChatNotFound(chat_id.as_str().to_string())),
            Err(e) => Err(ParticipantError::Repository(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Chat, ChatType, MockChatRepository, ParticipantRole, ValueObjectError};

    fn existing_chat(chats: &mut MockChatRepository) -> ChatId {
        let chat = Chat::new(ChatType::Group, Some(1), None).unwrap();
        let id = chat.id().clone();
        chats
            .expect_get_by_id()
            .returning(move |_| Ok(Some(chat.clone())));
        id
    }

    #[tokio::test]
    async fn test_add_participant_success() {
        // テスト項目: 新しい参加者が既定の role/status で追加される
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        let chat_id = existing_chat(&mut chats);
        chats.expect_is_participant().returning(|_, _| Ok(false));
        chats.expect_add_participant().times(1).returning(Ok);
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase
            .add(
                &chat_id,
                NewParticipant {
                    user_id: Some("bob".to_string()),
                    ..NewParticipant::default()
                },
            )
            .await;

        // then (期待する結果):
        let participant = result.unwrap();
        assert_eq!(participant.user_id().as_str(), "bob");
        assert_eq!(participant.role(), ParticipantRole::Member);
        assert!(participant.can_participate());
    }

    #[tokio::test]
    async fn test_add_participant_requires_user_id() {
        // テスト項目: user_id がなければストアに触れずに MissingUserId
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        chats.expect_get_by_id().never();
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));
        let chat_id = ChatId::new("chat-1".to_string()).unwrap();

        // when (操作):
        let result = usecase.add(&chat_id, NewParticipant::default()).await;

        // then (期待する結果):
        assert_eq!(result, Err(ParticipantError::MissingUserId));
    }

    #[tokio::test]
    async fn test_add_participant_to_missing_chat() {
        // テスト項目: 存在しないチャットへの追加は ChatNotFound
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        chats.expect_get_by_id().returning(|_| Ok(None));
        chats.expect_add_participant().never();
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));
        let chat_id = ChatId::new("missing".to_string()).unwrap();

        // when (操作):
        let result = usecase
            .add(
                &chat_id,
                NewParticipant {
                    user_id: Some("bob".to_string()),
                    ..NewParticipant::default()
                },
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ParticipantError::ChatNotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_add_participant_rejects_unknown_role() {
        // テスト項目: 未知の role は InvalidData
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        let chat_id = existing_chat(&mut chats);
        chats.expect_add_participant().never();
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase
            .add(
                &chat_id,
                NewParticipant {
                    user_id: Some("bob".to_string()),
                    role: Some("owner".to_string()),
                    status: None,
                },
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ParticipantError::InvalidData(ValueObjectError::InvalidRole(
                "owner".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_add_participant_duplicate() {
        // テスト項目: すでに参加しているユーザーは AlreadyParticipant
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        let chat_id = existing_chat(&mut chats);
        chats.expect_is_participant().returning(|_, _| Ok(true));
        chats.expect_add_participant().never();
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase
            .add(
                &chat_id,
                NewParticipant {
                    user_id: Some("bob".to_string()),
                    ..NewParticipant::default()
                },
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ParticipantError::AlreadyParticipant("bob".to_string()))
        );
    }

    #[tokio::test]
    async fn test_add_participant_conflict_from_store_is_duplicate() {
        // テスト項目: ストアの一意制約違反も AlreadyParticipant として扱う
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        let chat_id = existing_chat(&mut chats);
        chats.expect_is_participant().returning(|_, _| Ok(false));
        chats
            .expect_add_participant()
            .returning(|_| Err(RepositoryError::Conflict("unique".to_string())));
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase
            .add(
                &chat_id,
                NewParticipant {
                    user_id: Some("bob".to_string()),
                    ..NewParticipant::default()
                },
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ParticipantError::AlreadyParticipant("bob".to_string()))
        );
    }

    #[tokio::test]
    async fn test_list_participants_of_missing_chat() {
        // テスト項目: 存在しないチャットの参加者一覧は ChatNotFound
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        chats.expect_get_by_id().returning(|_| Ok(None));
        chats.expect_list_participants().never();
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));

        // when (操作):
        let result = usecase
            .list(&ChatId::new("missing".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(ParticipantError::ChatNotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_participant_is_idempotent() {
        // テスト項目: 参加していないユーザーの削除もエラーにならない
        // given (前提条件):
        let mut chats = MockChatRepository::new();
        chats
            .expect_remove_participant()
            .times(2)
            .returning(|_, _| Ok(()));
        let usecase = ManageParticipantsUseCase::new(Arc::new(chats));
        let chat_id = ChatId::new("chat-1".to_string()).unwrap();

        // when (操作):
        let first = usecase.remove(&chat_id, "bob".to_string()).await;
        let second = usecase.remove(&chat_id, "bob".to_string()).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert!(second.is_ok());
    }
}
