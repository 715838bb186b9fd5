use super::MessageDraft;

/// Hand-off point between socket readers and the broadcast consumer.
#[cfg_attr(test, mockall::automock)]
pub trait MessagePublisher: Send + Sync {
    /// Queue a draft for persistence and fan-out without waiting.
    ///
    /// Returns `false` when the draft was dropped because the queue is full or
    /// closed. Producers are expected to carry on either way.
    fn publish(&self, draft: MessageDraft) -> bool;
}
