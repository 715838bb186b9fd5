//! HTTP API request and response DTOs for the chat application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::websocket::MessageDto;
use crate::domain::{Chat, ChatParticipant, Page};

/// Chat as returned by the REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDto {
    pub id: String,
    #[serde(rename = "type")]
    pub chat_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usergroup_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Chat> for ChatDto {
    fn from(chat: &Chat) -> Self {
        Self {
            id: chat.id().as_str().to_string(),
            chat_type: chat.chat_type().as_str().to_string(),
            usergroup_id: chat.group_ref(),
            container_id: chat.container_ref().map(str::to_string),
            created_at: chat.created_at(),
        }
    }
}

/// Participant as returned by the REST API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: String,
    pub chat_id: String,
    pub user_id: String,
    pub joined_at: DateTime<Utc>,
    pub role: String,
    pub status: String,
}

impl From<&ChatParticipant> for ParticipantDto {
    fn from(participant: &ChatParticipant) -> Self {
        Self {
            id: participant.id().as_str().to_string(),
            chat_id: participant.chat_id().as_str().to_string(),
            user_id: participant.user_id().as_str().to_string(),
            joined_at: participant.joined_at(),
            role: participant.role().as_str().to_string(),
            status: participant.status().as_str().to_string(),
        }
    }
}

/// Body of `POST /api/chats`
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default, rename = "type")]
    pub chat_type: Option<String>,
    #[serde(default)]
    pub usergroup_id: Option<i64>,
    #[serde(default)]
    pub container_id: Option<String>,
    /// When present, this user becomes the chat's first (admin) participant.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of `POST /api/chats/{chat_id}/chat-participants`
#[derive(Debug, Default, Deserialize)]
pub struct AddParticipantRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `PUT /api/messages/{message_id}/read`
#[derive(Debug, Deserialize)]
pub struct ReadStatusRequest {
    pub read_status: bool,
}

/// `limit` / `offset` query parameters.
///
/// Kept as raw strings: unparsable values fall back to the defaults instead
/// of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationQuery {
    pub fn page(&self) -> Page {
        let parse =
            |raw: &Option<String>| raw.as_deref().and_then(|v| v.trim().parse::<i64>().ok());
        Page::new(parse(&self.limit), parse(&self.offset))
    }
}

/// Query of `GET /api/messages`
#[derive(Debug, Default, Deserialize)]
pub struct UserMessagesQuery {
    /// Comma separated user ids.
    #[serde(default)]
    pub user_ids: String,
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}

/// `{data, count}` envelope for collections
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for DataEnvelope<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// `{messages, count}` envelope for message listings
#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesEnvelope {
    pub messages: Vec<MessageDto>,
    pub count: usize,
}

impl From<Vec<MessageDto>> for MessagesEnvelope {
    fn from(messages: Vec<MessageDto>) -> Self {
        Self {
            count: messages.len(),
            messages,
        }
    }
}

/// Health check body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub message: String,
    pub version: String,
}

/// Problem details body returned on every error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub title: String,
    pub error_code: String,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_query_tolerates_garbage() {
        // テスト項目: 数値でない limit/offset は既定値として扱われる
        // given (前提条件):
        let query = PaginationQuery {
            limit: Some("abc".to_string()),
            offset: Some("-1".to_string()),
        };

        // when (操作):
        let page = query.page();

        // then (期待する結果):
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_chat_dto_omits_absent_references() {
        // テスト項目: private チャットの JSON には参照フィールドが含まれない
        // given (前提条件):
        let chat = Chat::new(crate::domain::ChatType::Private, None, None).unwrap();

        // when (操作):
        let json = serde_json::to_value(ChatDto::from(&chat)).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "private");
        assert!(json.get("usergroup_id").is_none());
        assert!(json.get("container_id").is_none());
    }
}
