//! Infrastructure layer
//!
//! ドメイン層が定義するポートの具体的な実装（SQLite ストア、
//! リアルタイム配信、認証）と、外部とやり取りする DTO を置くレイヤー。

pub mod auth;
pub mod dto;
pub mod realtime;
pub mod repository;
