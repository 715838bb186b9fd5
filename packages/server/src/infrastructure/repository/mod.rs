//! Repository 実装
//!
//! ドメイン層の `ChatRepository` / `MessageRepository` trait を SQLite で実装します。
//! UseCase 層は trait のみに依存し、ここにある具体型は `runner` で注入されます。

pub mod sqlite;

pub use sqlite::{SqliteChatRepository, SqliteMessageRepository};
