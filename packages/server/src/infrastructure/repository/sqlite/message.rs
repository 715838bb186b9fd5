use async_trait::async_trait;
use chathub_shared::time::{from_unix_micros, to_unix_micros};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::domain::{
    ChatId, Message, MessageContent, MessageId, MessageRepository, Page, RepositoryError, UserId,
};

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: String,
    chat_id: String,
    sender_id: String,
    content: String,
    message_type: String,
    created_at: i64,
    read_status: bool,
}

impl TryFrom<MessageRow> for Message {
    type Error = RepositoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let corrupted =
            |what: String| RepositoryError::CorruptedRow(format!("message {}: {what}", row.id));
        let created_at = from_unix_micros(row.created_at)
            .ok_or_else(|| corrupted(format!("created_at out of range ({})", row.created_at)))?;
        Ok(Message::restore(
            MessageId::new(row.id.clone()).map_err(|e| corrupted(e.to_string()))?,
            ChatId::new(row.chat_id.clone()).map_err(|e| corrupted(e.to_string()))?,
            UserId::new(row.sender_id.clone()).map_err(|e| corrupted(e.to_string()))?,
            MessageContent::new(row.content.clone()).map_err(|e| corrupted(e.to_string()))?,
            row.message_type.clone(),
            created_at,
            row.read_status,
        ))
    }
}

const SELECT_MESSAGE: &str =
    "SELECT id, chat_id, sender_id, content, message_type, created_at, read_status FROM message";

/// SQLite-backed message store. Listings are newest first.
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO message (id, chat_id, sender_id, content, message_type, created_at, read_status) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id().as_str())
        .bind(message.chat_id().as_str())
        .bind(message.sender_id().as_str())
        .bind(message.content().as_str())
        .bind(message.message_type())
        .bind(to_unix_micros(&message.created_at()))
        .bind(message.read_status())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: &MessageId) -> Result<Option<Message>, RepositoryError> {
        let row: Option<MessageRow> = sqlx::query_as(&format!("{SELECT_MESSAGE} WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Message::try_from).transpose()
    }

    async fn list_by_chat(
        &self,
        chat_id: &ChatId,
        page: Page,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows: Vec<MessageRow> = sqlx::query_as(&format!(
            "{SELECT_MESSAGE} WHERE chat_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(chat_id.as_str())
        .bind(i64::from(page.limit()))
        .bind(i64::from(page.offset()))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Message::try_from).collect()
    }

    async fn list_by_participant_user_ids(
        &self,
        user_ids: Vec<UserId>,
        page: Page,
    ) -> Result<Vec<Message>, RepositoryError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT m.id, m.chat_id, m.sender_id, m.content, m.message_type, m.created_at, m.read_status \
             FROM message m INNER JOIN chat_participant cp ON m.chat_id = cp.chat_id \
             WHERE cp.user_id IN (",
        );
        {
            let mut separated = builder.separated(", ");
            for user_id in &user_ids {
                separated.push_bind(user_id.as_str().to_string());
            }
        }
        builder.push(") ORDER BY m.created_at DESC, m.id DESC LIMIT ");
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(page.offset()));

        let rows: Vec<MessageRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Message::try_from).collect()
    }

    async fn update_read_status(
        &self,
        id: &MessageId,
        read_status: bool,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE message SET read_status = ? WHERE id = ?")
            .bind(read_status)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM message WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Chat, ChatParticipant, ChatRepository, ChatType, IdFactory, MessageDraft},
        infrastructure::repository::sqlite::{SqliteChatRepository, connect_in_memory},
    };
    use chrono::{Duration, Utc};

    fn message_at(chat_id: &ChatId, sender: &str, content: &str, offset_ms: i64) -> Message {
        MessageDraft::new(
            chat_id.clone(),
            UserId::new(sender.to_string()).unwrap(),
            MessageContent::new(content.to_string()).unwrap(),
            Utc::now() + Duration::milliseconds(offset_ms),
        )
        .into_message(IdFactory::message_id())
    }

    fn contents(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.content().as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_by_chat_newest_first_with_pagination() {
        // テスト項目: チャットのメッセージは新しい順に返され、limit/offset が効く
        // given (前提条件):
        let repo = SqliteMessageRepository::new(connect_in_memory().await.unwrap());
        let chat_id = IdFactory::chat_id();
        let other_chat = IdFactory::chat_id();
        for (i, content) in ["first", "second", "third"].into_iter().enumerate() {
            repo.create(&message_at(&chat_id, "alice", content, i as i64 * 10))
                .await
                .unwrap();
        }
        repo.create(&message_at(&other_chat, "bob", "elsewhere", 0))
            .await
            .unwrap();

        // when (操作):
        let all = repo.list_by_chat(&chat_id, Page::default()).await.unwrap();
        let second_page = repo
            .list_by_chat(&chat_id, Page::new(Some(2), Some(2)))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(contents(&all), vec!["third", "second", "first"]);
        assert_eq!(contents(&second_page), vec!["first"]);
    }

    #[tokio::test]
    async fn test_update_read_status_and_delete() {
        // テスト項目: 既読フラグを更新でき、削除後は取得できない
        // given (前提条件):
        let repo = SqliteMessageRepository::new(connect_in_memory().await.unwrap());
        let message = message_at(&IdFactory::chat_id(), "alice", "hello", 0);
        repo.create(&message).await.unwrap();

        // when (操作):
        repo.update_read_status(message.id(), true).await.unwrap();

        // then (期待する結果):
        let stored = repo.get_by_id(message.id()).await.unwrap().unwrap();
        assert!(stored.read_status());
        assert_eq!(stored.message_type(), "text");
        assert_eq!(stored.created_at(), message.created_at());

        // when (操作):
        repo.delete(message.id()).await.unwrap();
        let second_delete = repo.delete(message.id()).await;

        // then (期待する結果):
        assert_eq!(repo.get_by_id(message.id()).await, Ok(None));
        assert!(second_delete.is_ok());
    }

    #[tokio::test]
    async fn test_list_by_participant_user_ids_spans_chats() {
        // テスト項目: 指定ユーザーが参加する全チャットのメッセージを取得できる
        // given (前提条件):
        let pool = connect_in_memory().await.unwrap();
        let chats = SqliteChatRepository::new(pool.clone());
        let repo = SqliteMessageRepository::new(pool);

        let first = chats
            .create(Chat::new(ChatType::Group, Some(1), None).unwrap())
            .await
            .unwrap();
        let second = chats
            .create(Chat::new(ChatType::Private, None, None).unwrap())
            .await
            .unwrap();
        let unrelated = chats
            .create(Chat::new(ChatType::Group, Some(2), None).unwrap())
            .await
            .unwrap();
        for (chat, user) in [
            (&first, "alice"),
            (&first, "bob"),
            (&second, "bob"),
            (&unrelated, "carol"),
        ] {
            let participant =
                ChatParticipant::new(chat.id().as_str().to_string(), user.to_string(), "", "")
                    .unwrap();
            chats.add_participant(participant).await.unwrap();
        }
        repo.create(&message_at(first.id(), "alice", "in first", 0)).await.unwrap();
        repo.create(&message_at(second.id(), "bob", "in second", 10)).await.unwrap();
        repo.create(&message_at(unrelated.id(), "carol", "hidden", 20)).await.unwrap();

        // when (操作):
        let user_ids = vec![
            UserId::new("alice".to_string()).unwrap(),
            UserId::new("bob".to_string()).unwrap(),
        ];
        let messages = repo
            .list_by_participant_user_ids(user_ids, Page::default())
            .await
            .unwrap();
        let none = repo
            .list_by_participant_user_ids(Vec::new(), Page::default())
            .await
            .unwrap();

        // then (期待する結果): 両ユーザーが参加するチャットでも重複しない
        assert_eq!(contents(&messages), vec!["in second", "in first"]);
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_messages_survive_chat_delete() {
        // テスト項目: チャットを削除してもメッセージは残る
        // given (前提条件):
        let pool = connect_in_memory().await.unwrap();
        let chats = SqliteChatRepository::new(pool.clone());
        let repo = SqliteMessageRepository::new(pool);
        let chat = chats
            .create(Chat::new(ChatType::Private, None, None).unwrap())
            .await
            .unwrap();
        repo.create(&message_at(chat.id(), "alice", "orphan soon", 0))
            .await
            .unwrap();

        // when (操作):
        chats.delete(chat.id()).await.unwrap();

        // then (期待する結果):
        let remaining = repo.list_by_chat(chat.id(), Page::default()).await.unwrap();
        assert_eq!(contents(&remaining), vec!["orphan soon"]);
    }
}
