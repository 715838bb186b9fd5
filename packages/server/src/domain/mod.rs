//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod publisher;
pub mod repository;
pub mod value_object;

pub use entity::{Chat, ChatParticipant, DEFAULT_MESSAGE_TYPE, Message, MessageDraft};
pub use error::{ChatConfigurationError, ValueObjectError};
pub use factory::IdFactory;
pub use publisher::MessagePublisher;
pub use repository::{ChatRepository, MessageRepository, RepositoryError};
pub use value_object::{
    ChatId, ChatTarget, ChatType, MessageContent, MessageId, Page, ParticipantId, ParticipantRole,
    ParticipantStatus, UserId,
};

#[cfg(test)]
pub use publisher::MockMessagePublisher;
#[cfg(test)]
pub use repository::{MockChatRepository, MockMessageRepository};
