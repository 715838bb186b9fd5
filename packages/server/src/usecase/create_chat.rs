//! UseCase: チャット作成
//!
//! - type 未指定の場合は group として扱う
//! - user_id が指定された場合は、チャットと Admin/Active の参加者を同一トランザクションで作成する

use std::{str::FromStr, sync::Arc};

use crate::domain::{
    Chat, ChatParticipant, ChatRepository, ChatType, ParticipantRole, ParticipantStatus,
};

use super::error::CreateChatError;

/// Input of [`CreateChatUseCase::execute`]
#[derive(Debug, Clone, Default)]
pub struct NewChat {
    pub chat_type: Option<String>,
    pub group_ref: Option<i64>,
    pub container_ref: Option<String>,
    /// First participant, registered as an active admin.
    pub creator: Option<String>,
}

/// チャット作成のユースケース
pub struct CreateChatUseCase {
    chats: Arc<dyn ChatRepository>,
}

impl CreateChatUseCase {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    pub async fn execute(&self, input: NewChat) -> Result<Chat, CreateChatError> {
        let chat_type = match input.chat_type.as_deref() {
            None | Some("") => ChatType::Group,
            Some(raw) => ChatType::from_str(raw).map_err(CreateChatError::InvalidChatType)?,
        };
        let chat = Chat::new(chat_type, input.group_ref, input.container_ref)?;

        let creator = input.creator.filter(|user_id| !user_id.is_empty());
        let created = match creator {
            Some(user_id) => {
                let participant = ChatParticipant::new(
                    chat.id().as_str().to_string(),
                    user_id,
                    ParticipantRole::Admin.as_str(),
                    ParticipantStatus::Active.as_str(),
                )
                .map_err(CreateChatError::InvalidParticipant)?;
                self.chats.create_with_participant(chat, participant).await?
            }
            None => self.chats.create(chat).await?,
        };

        tracing::info!(chat_id = %created.id(), chat_type = %created.chat_type(), "Chat created");
        Ok(created)
    }
}
