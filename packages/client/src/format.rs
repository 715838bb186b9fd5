//! Terminal rendering of chat messages.

use chathub_server::infrastructure::dto::websocket::MessageDto;
use chathub_shared::time::to_local_clock;

/// `[HH:MM:SS] sender: content`, in local time.
pub fn format_message(message: &MessageDto) -> String {
    format!(
        "[{}] {}: {}",
        to_local_clock(&message.created_at),
        message.sender_id,
        message.content
    )
}
