//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ChatId validation error
    #[error("ChatId cannot be empty")]
    ChatIdEmpty,

    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// ParticipantId validation error
    #[error("ParticipantId cannot be empty")]
    ParticipantIdEmpty,

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,

    /// Unknown chat type
    #[error("invalid chat type: {0}. Must be one of: private, group, container")]
    InvalidChatType(String),

    /// Unknown participant role
    #[error("invalid role: {0}. Must be 'admin' or 'member'")]
    InvalidRole(String),

    /// Unknown participant status
    #[error("invalid status: {0}. Must be one of: active, left, banned, muted, pending")]
    InvalidStatus(String),

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors raised when a chat's type and references do not agree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatConfigurationError {
    #[error("group chat requires a usergroup_id")]
    MissingGroupRef,

    #[error("container chat requires a container_id")]
    MissingContainerRef,

    #[error("{chat_type} chat must not carry a usergroup_id")]
    UnexpectedGroupRef { chat_type: String },

    #[error("{chat_type} chat must not carry a container_id")]
    UnexpectedContainerRef { chat_type: String },

    #[error("container_id cannot be empty")]
    EmptyContainerRef,
}
