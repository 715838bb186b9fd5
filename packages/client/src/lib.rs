//! Terminal client for the chat server.
//!
//! Connects to one chat's WebSocket endpoint, sends every typed line as a
//! message and prints everything the chat broadcasts.

pub mod config;
pub mod error;
pub mod format;
pub mod session;

pub use config::ClientConfig;
pub use error::ClientError;
pub use session::run_client;
