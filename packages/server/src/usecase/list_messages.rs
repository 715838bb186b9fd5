//! UseCase: メッセージ一覧（チャット / ユーザーグループ / ユーザー ID 指定）
//!
//! いずれも新しい順で、ページングは [`Page`] に従う。

use std::sync::Arc;

use crate::domain::{
    ChatId, ChatRepository, ChatTarget, Message, MessageRepository, Page, UserId,
};

use super::error::MessageQueryError;

/// Upper bound on the ids of one `user_ids` query; each id is a bound SQL parameter.
pub const MAX_USER_IDS: usize = 500;

/// メッセージ一覧のユースケース
pub struct ListMessagesUseCase {
    chats: Arc<dyn ChatRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesUseCase {
    pub fn new(chats: Arc<dyn ChatRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self { chats, messages }
    }

    /// Messages of one chat. An unknown chat simply has no messages.
    pub async fn by_chat(
        &self,
        chat_id: &ChatId,
        page: Page,
    ) -> Result<Vec<Message>, MessageQueryError> {
        Ok(self.messages.list_by_chat(chat_id, page).await?)
    }

    /// Messages of the chat bound to a user group.
    pub async fn by_group_ref(
        &self,
        group_ref: i64,
        page: Page,
    ) -> Result<Vec<Message>, MessageQueryError> {
        let chat = self
            .chats
            .get_by_group_ref(group_ref)
            .await?
            .ok_or(MessageQueryError::ChatNotFound(ChatTarget::ByGroupRef(group_ref)))?;
        self.by_chat(chat.id(), page).await
    }

    /// Messages of every chat any of the comma separated `user_ids` belongs to.
    pub async fn by_user_ids(
        &self,
        user_ids: &str,
        page: Page,
    ) -> Result<Vec<Message>, MessageQueryError> {
        let user_ids = parse_user_ids(user_ids)?;
        Ok(self
            .messages
            .list_by_participant_user_ids(user_ids, page)
            .await?)
    }
}

fn parse_user_ids(raw: &str) -> Result<Vec<UserId>, MessageQueryError> {
    let user_ids = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| UserId::new(id.to_string()).map_err(MessageQueryError::InvalidUserId))
        .collect::<Result<Vec<_>, _>>()?;
    if user_ids.is_empty() {
        return Err(MessageQueryError::MissingUserIds);
    }
    if user_ids.len() > MAX_USER_IDS {
        return Err(MessageQueryError::TooManyUserIds {
            given: user_ids.len(),
            max: MAX_USER_IDS,
        });
    }
    Ok(user_ids)
}
