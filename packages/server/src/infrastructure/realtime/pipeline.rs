//! Broadcast pipeline
//!
//! ソケットの読み取りループ（producer）と、永続化 → 配信を行う単一の
//! consumer タスクを有界キューでつなぐ。
//!
//! - `publish` はブロックしない。キューが満杯ならメッセージを破棄してログに残す
//! - consumer はキューから取り出した順に 1 件ずつ「ID 採番 → 保存 → fan-out」を行う
//! - 保存に失敗したメッセージは配信しない

use std::sync::Arc;

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use super::registry::{ConnectionRegistry, FanOutReport};
use crate::domain::{IdFactory, MessageDraft, MessagePublisher, MessageRepository};

/// Producer side of the pipeline. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BroadcastPipeline {
    sender: mpsc::Sender<MessageDraft>,
}

/// Consumer side of the pipeline
pub struct PipelineConsumer {
    receiver: mpsc::Receiver<MessageDraft>,
    repository: Arc<dyn MessageRepository>,
    registry: Arc<ConnectionRegistry>,
}

impl BroadcastPipeline {
    /// Build both ends of a pipeline with a queue of `capacity` drafts.
    pub fn new(
        capacity: usize,
        repository: Arc<dyn MessageRepository>,
        registry: Arc<ConnectionRegistry>,
    ) -> (Self, PipelineConsumer) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self { sender },
            PipelineConsumer {
                receiver,
                repository,
                registry,
            },
        )
    }

    /// Build the pipeline and run its consumer on a background task.
    ///
    /// The task ends once every `BroadcastPipeline` clone is dropped and the
    /// queue is drained.
    pub fn spawn(
        capacity: usize,
        repository: Arc<dyn MessageRepository>,
        registry: Arc<ConnectionRegistry>,
    ) -> (Self, JoinHandle<()>) {
        let (pipeline, consumer) = Self::new(capacity, repository, registry);
        let handle = tokio::spawn(consumer.run());
        (pipeline, handle)
    }
}

impl MessagePublisher for BroadcastPipeline {
    fn publish(&self, draft: MessageDraft) -> bool {
        match self.sender.try_send(draft) {
            Ok(()) => true,
            Err(TrySendError::Full(draft)) => {
                tracing::warn!(
                    chat_id = %draft.chat_id(),
                    sender_id = %draft.sender_id(),
                    "Broadcast queue is full, dropping message"
                );
                false
            }
            Err(TrySendError::Closed(draft)) => {
                tracing::error!(
                    chat_id = %draft.chat_id(),
                    "Broadcast pipeline is closed, dropping message"
                );
                false
            }
        }
    }
}

impl PipelineConsumer {
    /// Process drafts in FIFO order until every producer is gone.
    pub async fn run(mut self) {
        tracing::info!("Broadcast pipeline started");
        while let Some(draft) = self.receiver.recv().await {
            self.process(draft).await;
        }
        tracing::info!("Broadcast pipeline stopped");
    }

    /// Persist one draft and fan it out. Returns `None` when it could not be stored.
    pub async fn process(&self, draft: MessageDraft) -> Option<FanOutReport> {
        let message = draft.into_message(IdFactory::message_id());

        if let Err(e) = self.repository.create(&message).await {
            tracing::error!(
                message_id = %message.id(),
                chat_id = %message.chat_id(),
                "Failed to persist message, not broadcasting: {}",
                e
            );
            return None;
        }

        let report = self.registry.fan_out(&message).await;
        tracing::info!(
            message_id = %message.id(),
            chat_id = %message.chat_id(),
            attempted = report.attempted,
            delivered = report.delivered,
            evicted = report.evicted,
            "Message broadcast"
        );
        Some(report)
    }
}
