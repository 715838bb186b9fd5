//! Handler modules for HTTP and WebSocket endpoints.

pub mod chat;
pub mod health;
pub mod message;
pub mod websocket;

pub use chat::{
    add_participant, create_chat, delete_chat, get_chat, get_group_chat, list_participants,
    remove_participant,
};
pub use health::health_check;
pub use message::{
    delete_message, list_chat_messages, list_group_messages, list_user_messages,
    mark_message_read,
};
pub use websocket::{chat_websocket_handler, group_websocket_handler};

use crate::{
    domain::{ChatId, MessageId},
    ui::error::ApiError,
};

/// Chat id from a path segment
fn chat_id_from_path(raw: String) -> Result<ChatId, ApiError> {
    ChatId::new(raw).map_err(|e| ApiError::not_found("ChatNotFound", e.to_string()))
}

fn message_id_from_path(raw: String) -> Result<MessageId, ApiError> {
    MessageId::new(raw).map_err(|e| ApiError::not_found("MessageNotFound", e.to_string()))
}

/// User-group ids must be integers.
fn group_ref_from_path(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request("InvalidGroupId", format!("invalid group id: '{raw}'")))
}
