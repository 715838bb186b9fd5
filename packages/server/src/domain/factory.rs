//! Domain factories for creating identifiers.

use uuid::Uuid;

use super::{ChatId, MessageId, ParticipantId};

/// Factory for generating entity identifiers.
///
/// Every identifier is a UUID v7, so ids sort by creation time. Generation is
/// kept here so the validating constructors on the id types stay pure.
pub struct IdFactory;

impl IdFactory {
    /// Generate a new ChatId.
    pub fn chat_id() -> ChatId {
        ChatId(Self::next())
    }

    /// Generate a new ParticipantId.
    pub fn participant_id() -> ParticipantId {
        ParticipantId(Self::next())
    }

    /// Generate a new MessageId.
    pub fn message_id() -> MessageId {
        MessageId(Self::next())
    }

    fn next() -> String {
        Uuid::now_v7().to_string()
    }
}
