//! WebSocket message DTOs for the chat application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Message;

/// Query parameters of the WebSocket endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// A frame sent by a client.
///
/// Anything else the client puts in the object (`id`, `chat_id`,
/// `created_at`, ...) is ignored; the server stamps those itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// A message as exchanged over the socket and returned by the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    pub read_status: bool,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().as_str().to_string(),
            chat_id: message.chat_id().as_str().to_string(),
            sender_id: message.sender_id().as_str().to_string(),
            content: message.content().as_str().to_string(),
            message_type: message.message_type().to_string(),
            created_at: message.created_at(),
            read_status: message.read_status(),
        }
    }
}
