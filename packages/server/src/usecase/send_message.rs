//! UseCase: メッセージ送信処理
//!
//! WebSocket で受け取ったメッセージを検証し、チャット ID・既定の種別・
//! サーバー時刻を付与して broadcast pipeline に渡す。
//! ID の採番・保存・配信は pipeline 側で行う。

use std::sync::Arc;

use chathub_shared::time::now_utc;

use crate::domain::{ChatId, MessageContent, MessageDraft, MessagePublisher, UserId};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    publisher: Arc<dyn MessagePublisher>,
}

impl SendMessageUseCase {
    pub fn new(publisher: Arc<dyn MessagePublisher>) -> Self {
        Self { publisher }
    }

    /// Validate and stamp an inbound message, then queue it.
    ///
    /// Returns whether the pipeline accepted it. A full queue is not an error:
    /// the message is dropped and the caller carries on reading.
    pub async fn execute(
        &self,
        chat_id: &ChatId,
        sender_id: Option<String>,
        content: String,
    ) -> Result<bool, SendMessageError> {
        let sender_id =
            UserId::new(sender_id.unwrap_or_default()).map_err(SendMessageError::InvalidSender)?;
        let content = MessageContent::new(content).map_err(SendMessageError::InvalidContent)?;

        let draft = MessageDraft::new(chat_id.clone(), sender_id, content, now_utc());
        Ok(self.publisher.publish(draft))
    }
}
