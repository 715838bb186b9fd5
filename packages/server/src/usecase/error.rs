//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{ChatConfigurationError, ChatTarget, RepositoryError, ValueObjectError};

/// Chat creation errors
#[derive(Debug, Error, PartialEq)]
pub enum CreateChatError {
    #[error(transparent)]
    InvalidChatType(ValueObjectError),
    #[error(transparent)]
    InvalidConfiguration(#[from] ChatConfigurationError),
    #[error("invalid participant data: {0}")]
    InvalidParticipant(ValueObjectError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors of operations addressing one chat
#[derive(Debug, Error, PartialEq)]
pub enum ChatLookupError {
    #[error("chat not found: {0}")]
    NotFound(ChatTarget),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Participant management errors
#[derive(Debug, Error, PartialEq)]
pub enum ParticipantError {
    #[error("chat not found: {0}")]
    ChatNotFound(String),
    #[error("user_id is required")]
    MissingUserId,
    #[error("invalid participant data: {0}")]
    InvalidData(#[from] ValueObjectError),
    #[error("user '{0}' is already a participant")]
    AlreadyParticipant(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Message listing and update errors
#[derive(Debug, Error, PartialEq)]
pub enum MessageQueryError {
    #[error("chat not found: {0}")]
    ChatNotFound(ChatTarget),
    #[error("user_ids is required")]
    MissingUserIds,
    #[error("invalid user id: {0}")]
    InvalidUserId(ValueObjectError),
    #[error("too many user ids: {given} (at most {max})")]
    TooManyUserIds { given: usize, max: usize },
    #[error("message not found: {0}")]
    MessageNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Inbound socket message errors
#[derive(Debug, Error, PartialEq)]
pub enum SendMessageError {
    #[error("invalid sender: {0}")]
    InvalidSender(ValueObjectError),
    #[error("invalid content: {0}")]
    InvalidContent(ValueObjectError),
}
