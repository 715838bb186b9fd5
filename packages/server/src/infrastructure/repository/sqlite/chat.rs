use async_trait::async_trait;
use chathub_shared::time::{from_unix_micros, to_unix_micros};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::domain::{
    Chat, ChatId, ChatParticipant, ChatRepository, ChatType, ParticipantId, RepositoryError,
    UserId, ValueObjectError,
};

#[derive(Debug, sqlx::FromRow)]
struct ChatRow {
    id: String,
    #[sqlx(rename = "type")]
    chat_type: String,
    usergroup_id: Option<i64>,
    container_id: Option<String>,
    created_at: i64,
}

impl TryFrom<ChatRow> for Chat {
    type Error = RepositoryError;

    fn try_from(row: ChatRow) -> Result<Self, Self::Error> {
        let corrupted =
            |what: String| RepositoryError::CorruptedRow(format!("chat {}: {what}", row.id));
        let id = ChatId::new(row.id.clone()).map_err(|e| corrupted(e.to_string()))?;
        let chat_type = row
            .chat_type
            .parse::<ChatType>()
            .map_err(|e| corrupted(e.to_string()))?;
        let created_at = from_unix_micros(row.created_at)
            .ok_or_else(|| corrupted(format!("created_at out of range ({})", row.created_at)))?;
        Chat::restore(id, chat_type, row.usergroup_id, row.container_id.clone(), created_at)
            .map_err(|e| corrupted(e.to_string()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    id: String,
    chat_id: String,
    user_id: String,
    role: String,
    status: String,
    joined_at: i64,
}

impl TryFrom<ParticipantRow> for ChatParticipant {
    type Error = RepositoryError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let corrupted =
            |what: String| RepositoryError::CorruptedRow(format!("participant {}: {what}", row.id));
        let joined_at = from_unix_micros(row.joined_at)
            .ok_or_else(|| corrupted(format!("joined_at out of range ({})", row.joined_at)))?;
        Ok(ChatParticipant::restore(
            ParticipantId::new(row.id.clone()).map_err(|e| corrupted(e.to_string()))?,
            ChatId::new(row.chat_id.clone()).map_err(|e| corrupted(e.to_string()))?,
            UserId::new(row.user_id.clone()).map_err(|e| corrupted(e.to_string()))?,
            row.role.parse().map_err(|e: ValueObjectError| corrupted(e.to_string()))?,
            row.status.parse().map_err(|e: ValueObjectError| corrupted(e.to_string()))?,
            joined_at,
        ))
    }
}

const SELECT_CHAT: &str = "SELECT id, type, usergroup_id, container_id, created_at FROM chat";

async fn insert_chat<'e, E>(executor: E, chat: &Chat) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO chat (id, type, usergroup_id, container_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(chat.id().as_str())
    .bind(chat.chat_type().as_str())
    .bind(chat.group_ref())
    .bind(chat.container_ref())
    .bind(to_unix_micros(&chat.created_at()))
    .execute(executor)
    .await?;
    Ok(())
}

async fn insert_participant<'e, E>(
    executor: E,
    participant: &ChatParticipant,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "INSERT INTO chat_participant (id, chat_id, user_id, role, status, joined_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(participant.id().as_str())
    .bind(participant.chat_id().as_str())
    .bind(participant.user_id().as_str())
    .bind(participant.role().as_str())
    .bind(participant.status().as_str())
    .bind(to_unix_micros(&participant.joined_at()))
    .execute(executor)
    .await?;
    Ok(())
}

/// SQLite-backed chat and participant store.
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: SqlitePool,
}

impl SqliteChatRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn get_by_id(&self, id: &ChatId) -> Result<Option<Chat>, RepositoryError> {
        let row: Option<ChatRow> = sqlx::query_as(&format!("{SELECT_CHAT} WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(Chat::try_from).transpose()
    }

    async fn get_by_group_ref(&self, group_ref: i64) -> Result<Option<Chat>, RepositoryError> {
        let row: Option<ChatRow> = sqlx::query_as(&format!(
            "{SELECT_CHAT} WHERE usergroup_id = ? AND type = 'group' ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(group_ref)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Chat::try_from).transpose()
    }

    async fn create(&self, chat: Chat) -> Result<Chat, RepositoryError> {
        insert_chat(&self.pool, &chat).await?;
        tracing::debug!("Created {} chat {}", chat.chat_type(), chat.id());
        Ok(chat)
    }

    async fn create_with_participant(
        &self,
        chat: Chat,
        participant: ChatParticipant,
    ) -> Result<Chat, RepositoryError> {
        // Dropping `tx` on an early return rolls both inserts back.
        let mut tx = self.pool.begin().await?;
        insert_chat(&mut *tx, &chat).await?;
        insert_participant(&mut *tx, &participant).await?;
        tx.commit().await?;

        tracing::debug!(
            "Created {} chat {} with participant {}",
            chat.chat_type(),
            chat.id(),
            participant.user_id()
        );
        Ok(chat)
    }

    async fn delete(&self, id: &ChatId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM chat WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_participants(
        &self,
        chat_id: &ChatId,
    ) -> Result<Vec<ChatParticipant>, RepositoryError> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            "SELECT id, chat_id, user_id, role, status, joined_at FROM chat_participant WHERE chat_id = ? ORDER BY joined_at ASC, id ASC",
        )
        .bind(chat_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ChatParticipant::try_from).collect()
    }

    async fn add_participant(
        &self,
        participant: ChatParticipant,
    ) -> Result<ChatParticipant, RepositoryError> {
        insert_participant(&self.pool, &participant).await?;
        Ok(participant)
    }

    async fn is_participant(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM chat_participant WHERE chat_id = ? AND user_id = ?",
        )
        .bind(chat_id.as_str())
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn remove_participant(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM chat_participant WHERE chat_id = ? AND user_id = ?")
            .bind(chat_id.as_str())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
