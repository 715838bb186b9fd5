//! Persistence ports.
//!
//! The use case layer depends on these traits only; `infrastructure::repository`
//! provides the SQLite implementations (dependency inversion).

use async_trait::async_trait;
use thiserror::Error;

use super::{Chat, ChatId, ChatParticipant, Message, MessageId, Page, UserId};

/// Errors surfaced by a store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store failed (connection, SQL, transaction).
    #[error("storage failure: {0}")]
    Storage(String),

    /// A unique constraint rejected the write.
    #[error("duplicate entry: {0}")]
    Conflict(String),

    /// A stored row no longer satisfies the domain rules.
    #[error("stored row is invalid: {0}")]
    CorruptedRow(String),
}

/// Chat and participant store.
///
/// Lookups return `Ok(None)` when the row does not exist; absence is never an
/// error. Deleting or removing something that is not there succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn get_by_id(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError>;

    /// Find the group chat bound to a user group.
    async fn get_by_group_ref(&self, group_ref: i64) -> Result<Option<Chat>, RepositoryError>;

    async fn create(&self, chat: Chat) -> Result<Chat, RepositoryError>;

    /// Insert a chat and its first participant in one transaction.
    ///
    /// Either both rows are committed or neither is.
    async fn create_with_participant(
        &self,
        chat: Chat,
        participant: ChatParticipant,
    ) -> Result<Chat, RepositoryError>;

    /// Hard delete; participants go with the chat, messages are left behind.
    async fn delete(&self, id: &ChatId) -> Result<(), RepositoryError>;

    /// Participants ordered by join time, oldest first.
    async fn list_participants(
        &self,
        chat_id: &ChatId,
    ) -> Result<Vec<ChatParticipant>, RepositoryError>;

    async fn add_participant(
        &self,
        participant: ChatParticipant,
    ) -> Result<ChatParticipant, RepositoryError>;

    async fn is_participant(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError>;

    async fn remove_participant(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError>;
}

/// Message store.
///
/// Every listing is ordered newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &Message) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError>;

    async fn list_by_chat(
        &self,
        chat_id: &ChatId,
        page: Page,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// Messages of every chat in which any of `user_ids` is a participant.
    async fn list_by_participant_user_ids(
        &self,
        user_ids: Vec<UserId>,
        page: Page,
    ) -> Result<Vec<Message>, RepositoryError>;

    async fn update_read_status(
        &self,
        id: &MessageId,
        read_status: bool,
    ) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &MessageId) -> Result<(), RepositoryError>;
}
