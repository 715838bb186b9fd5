//! Core domain models for the chat application.

use chrono::{DateTime, Utc};

use super::{
    error::{ChatConfigurationError, ValueObjectError},
    factory::IdFactory,
    value_object::{
        ChatId, ChatType, MessageContent, MessageId, ParticipantId, ParticipantRole,
        ParticipantStatus, UserId,
    },
};

/// Message type stamped on every message accepted from a socket.
pub const DEFAULT_MESSAGE_TYPE: &str = "text";

/// A conversation container.
///
/// A group chat carries exactly a group reference, a container chat exactly a
/// container reference, and a private chat neither. Fields are private so the
/// rule checked at construction cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    id: ChatId,
    chat_type: ChatType,
    group_ref: Option<i64>,
    container_ref: Option<String>,
    created_at: DateTime<Utc>,
}

impl Chat {
    /// Create a new chat with a fresh time-ordered id.
    ///
    /// # Errors
    ///
    /// Returns `ChatConfigurationError` if the references do not match the type.
    pub fn new(
        chat_type: ChatType,
        group_ref: Option<i64>,
        container_ref: Option<String>,
    ) -> Result<Self, ChatConfigurationError> {
        Self::validate(chat_type, group_ref, container_ref.as_deref())?;
        Ok(Self {
            id: IdFactory::chat_id(),
            chat_type,
            group_ref,
            container_ref,
            created_at: Utc::now(),
        })
    }

    /// Rebuild a chat from stored values, re-checking the configuration rule.
    pub fn restore(
        id: ChatId,
        chat_type: ChatType,
        group_ref: Option<i64>,
        container_ref: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ChatConfigurationError> {
        Self::validate(chat_type, group_ref, container_ref.as_deref())?;
        Ok(Self {
            id,
            chat_type,
            group_ref,
            container_ref,
            created_at,
        })
    }

    fn validate(
        chat_type: ChatType,
        group_ref: Option<i64>,
        container_ref: Option<&str>,
    ) -> Result<(), ChatConfigurationError> {
        if container_ref.is_some_and(|c| c.trim().is_empty()) {
            return Err(ChatConfigurationError::EmptyContainerRef);
        }
        let unexpected_group = || ChatConfigurationError::UnexpectedGroupRef {
            chat_type: chat_type.to_string(),
        };
        let unexpected_container = || ChatConfigurationError::UnexpectedContainerRef {
            chat_type: chat_type.to_string(),
        };
        match chat_type {
            ChatType::Group if group_ref.is_none() => Err(ChatConfigurationError::MissingGroupRef),
            ChatType::Group if container_ref.is_some() => Err(unexpected_container()),
            ChatType::Container if container_ref.is_none() => {
                Err(ChatConfigurationError::MissingContainerRef)
            }
            ChatType::Container if group_ref.is_some() => Err(unexpected_group()),
            ChatType::Private if group_ref.is_some() => Err(unexpected_group()),
            ChatType::Private if container_ref.is_some() => Err(unexpected_container()),
            _ => Ok(()),
        }
    }

    pub fn id(&self) -> &ChatId {
        &self.id
    }

    pub fn chat_type(&self) -> ChatType {
        self.chat_type
    }

    pub fn group_ref(&self) -> Option<i64> {
        self.group_ref
    }

    pub fn container_ref(&self) -> Option<&str> {
        self.container_ref.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user's membership record in a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatParticipant {
    id: ParticipantId,
    chat_id: ChatId,
    user_id: UserId,
    role: ParticipantRole,
    status: ParticipantStatus,
    joined_at: DateTime<Utc>,
}

impl ChatParticipant {
    /// Create a participant from raw request values.
    ///
    /// An empty `role` means `member`, an empty `status` means `active`. The id
    /// and join time are assigned here, never taken from the caller.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError` for an empty chat/user id or an unknown
    /// role/status string.
    pub fn new(
        chat_id: String,
        user_id: String,
        role: &str,
        status: &str,
    ) -> Result<Self, ValueObjectError> {
        let chat_id = ChatId::new(chat_id)?;
        let user_id = UserId::new(user_id)?;
        let role = role.parse::<ParticipantRole>()?;
        let status = status.parse::<ParticipantStatus>()?;
        Ok(Self {
            id: IdFactory::participant_id(),
            chat_id,
            user_id,
            role,
            status,
            joined_at: Utc::now(),
        })
    }

    /// Rebuild a participant from stored values.
    pub fn restore(
        id: ParticipantId,
        chat_id: ChatId,
        user_id: UserId,
        role: ParticipantRole,
        status: ParticipantStatus,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            chat_id,
            user_id,
            role,
            status,
            joined_at,
        }
    }

    /// Change the role, leaving the participant untouched if `role` is unknown.
    pub fn change_role(&mut self, role: &str) -> Result<(), ValueObjectError> {
        self.role = role.parse()?;
        Ok(())
    }

    /// Change the status, leaving the participant untouched if `status` is unknown.
    pub fn change_status(&mut self, status: &str) -> Result<(), ValueObjectError> {
        self.status = status.parse()?;
        Ok(())
    }

    pub fn can_participate(&self) -> bool {
        self.status.can_participate()
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> ParticipantRole {
        self.role
    }

    pub fn status(&self) -> ParticipantStatus {
        self.status
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}

/// An inbound message stamped by its session but not yet persisted.
///
/// The broadcast pipeline turns it into a [`Message`] by assigning an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    chat_id: ChatId,
    sender_id: UserId,
    content: MessageContent,
    message_type: String,
    created_at: DateTime<Utc>,
}

impl MessageDraft {
    /// Stamp an inbound message with its chat, the default type and the server time.
    pub fn new(
        chat_id: ChatId,
        sender_id: UserId,
        content: MessageContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            chat_id,
            sender_id,
            content,
            message_type: DEFAULT_MESSAGE_TYPE.to_string(),
            created_at,
        }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Accept the draft under the given id. New messages are unread.
    pub fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            chat_id: self.chat_id,
            sender_id: self.sender_id,
            content: self.content,
            message_type: self.message_type,
            created_at: self.created_at,
            read_status: false,
        }
    }
}

/// A persisted chat message. Immutable apart from its read flag, which only
/// the message store changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    chat_id: ChatId,
    sender_id: UserId,
    content: MessageContent,
    message_type: String,
    created_at: DateTime<Utc>,
    read_status: bool,
}

impl Message {
    /// Rebuild a message from stored values.
    pub fn restore(
        id: MessageId,
        chat_id: ChatId,
        sender_id: UserId,
        content: MessageContent,
        message_type: String,
        created_at: DateTime<Utc>,
        read_status: bool,
    ) -> Self {
        Self {
            id,
            chat_id,
            sender_id,
            content,
            message_type,
            created_at,
            read_status,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn read_status(&self) -> bool {
        self.read_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_new_accepts_matching_references() {
        // テスト項目: 種別に合った参照を持つチャットは作成でき、入力値がそのまま保持される
        // given (前提条件):
        let cases = [
            (ChatType::Private, None, None),
            (ChatType::Group, Some(100), None),
            (ChatType::Container, None, Some("box-1".to_string())),
        ];

        for (chat_type, group_ref, container_ref) in cases {
            // when (操作):
            let chat = Chat::new(chat_type, group_ref, container_ref.clone()).unwrap();

            // then (期待する結果):
            assert_eq!(chat.chat_type(), chat_type);
            assert_eq!(chat.group_ref(), group_ref);
            assert_eq!(chat.container_ref(), container_ref.as_deref());
            assert!(!chat.id().as_str().is_empty());
        }
    }

    #[test]
    fn test_chat_new_rejects_mismatched_references() {
        // テスト項目: 種別と参照の組み合わせが不正なチャットは作成できない
        // given (前提条件):
        let container = || Some("box-1".to_string());
        let cases = [
            (ChatType::Group, None, None, ChatConfigurationError::MissingGroupRef),
            (ChatType::Group, None, container(), ChatConfigurationError::MissingGroupRef),
            (
                ChatType::Group,
                Some(1),
                container(),
                ChatConfigurationError::UnexpectedContainerRef {
                    chat_type: "group".to_string(),
                },
            ),
            (ChatType::Container, None, None, ChatConfigurationError::MissingContainerRef),
            (ChatType::Container, Some(1), None, ChatConfigurationError::MissingContainerRef),
            (
                ChatType::Container,
                Some(1),
                container(),
                ChatConfigurationError::UnexpectedGroupRef {
                    chat_type: "container".to_string(),
                },
            ),
            (
                ChatType::Private,
                Some(1),
                None,
                ChatConfigurationError::UnexpectedGroupRef {
                    chat_type: "private".to_string(),
                },
            ),
            (
                ChatType::Private,
                None,
                container(),
                ChatConfigurationError::UnexpectedContainerRef {
                    chat_type: "private".to_string(),
                },
            ),
            (
                ChatType::Container,
                None,
                Some("  ".to_string()),
                ChatConfigurationError::EmptyContainerRef,
            ),
        ];

        for (chat_type, group_ref, container_ref, expected) in cases {
            // when (操作):
            let result = Chat::new(chat_type, group_ref, container_ref);

            // then (期待する結果):
            assert_eq!(result, Err(expected));
        }
    }

    #[test]
    fn test_participant_new_applies_defaults() {
        // テスト項目: ロール・ステータスが空の場合は member / active になる
        // when (操作):
        let participant =
            ChatParticipant::new("chat-1".to_string(), "alice".to_string(), "", "").unwrap();

        // then (期待する結果):
        assert_eq!(participant.role(), ParticipantRole::Member);
        assert_eq!(participant.status(), ParticipantStatus::Active);
        assert!(participant.can_participate());
        assert_eq!(participant.chat_id().as_str(), "chat-1");
        assert_eq!(participant.user_id().as_str(), "alice");
    }

    #[test]
    fn test_participant_new_rejects_invalid_fields() {
        // テスト項目: 空の ID や未知のロール・ステータスでは参加者を作成できない
        // then (期待する結果):
        assert_eq!(
            ChatParticipant::new("".to_string(), "alice".to_string(), "", ""),
            Err(ValueObjectError::ChatIdEmpty)
        );
        assert_eq!(
            ChatParticipant::new("chat-1".to_string(), "".to_string(), "", ""),
            Err(ValueObjectError::UserIdEmpty)
        );
        assert_eq!(
            ChatParticipant::new("chat-1".to_string(), "alice".to_string(), "owner", ""),
            Err(ValueObjectError::InvalidRole("owner".to_string()))
        );
        assert_eq!(
            ChatParticipant::new("chat-1".to_string(), "alice".to_string(), "", "gone"),
            Err(ValueObjectError::InvalidStatus("gone".to_string()))
        );
    }

    #[test]
    fn test_participant_change_role_and_status() {
        // テスト項目: 有効な値ではロール・ステータスを変更でき、無効な値では変更されない
        // given (前提条件):
        let mut participant =
            ChatParticipant::new("chat-1".to_string(), "alice".to_string(), "admin", "active")
                .unwrap();
        let before = participant.clone();

        // when (操作):
        let bad_role = participant.change_role("superuser");
        let bad_status = participant.change_status("deleted");

        // then (期待する結果):
        assert!(bad_role.is_err());
        assert!(bad_status.is_err());
        assert_eq!(participant, before);

        // when (操作):
        participant.change_role("member").unwrap();
        participant.change_status("banned").unwrap();

        // then (期待する結果):
        assert_eq!(participant.role(), ParticipantRole::Member);
        assert_eq!(participant.status(), ParticipantStatus::Banned);
        assert!(!participant.can_participate());
    }

    #[test]
    fn test_draft_into_message_is_unread_text() {
        // テスト項目: 下書きから生成したメッセージは既定の種別で未読になる
        // given (前提条件):
        let created_at = Utc::now();
        let draft = MessageDraft::new(
            ChatId::new("chat-1".to_string()).unwrap(),
            UserId::new("alice".to_string()).unwrap(),
            MessageContent::new("hi".to_string()).unwrap(),
            created_at,
        );

        // when (操作):
        let message = draft.into_message(IdFactory::message_id());

        // then (期待する結果):
        assert_eq!(message.message_type(), DEFAULT_MESSAGE_TYPE);
        assert_eq!(message.created_at(), created_at);
        assert!(!message.read_status());
        assert_eq!(message.content().as_str(), "hi");
    }
}
