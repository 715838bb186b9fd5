//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層のポートを通して永続化・配信を行います。

pub mod create_chat;
pub mod delete_chat;
pub mod error;
pub mod get_chat;
pub mod list_messages;
pub mod manage_participants;
pub mod send_message;
pub mod update_message;

pub use create_chat::{CreateChatUseCase, NewChat};
pub use delete_chat::DeleteChatUseCase;
pub use error::{
    ChatLookupError, CreateChatError, MessageQueryError, ParticipantError, SendMessageError,
};
pub use get_chat::GetChatUseCase;
pub use list_messages::{ListMessagesUseCase, MAX_USER_IDS};
pub use manage_participants::{ManageParticipantsUseCase, NewParticipant};
pub use send_message::SendMessageUseCase;
pub use update_message::UpdateMessageUseCase;
