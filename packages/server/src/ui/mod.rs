//! HTTP / WebSocket chat server implementation.

pub mod error;
mod handler;
pub mod router;
pub mod runner;
pub mod session;
mod signal;
pub mod state;

pub use handler::websocket::CLOSE_CHAT_NOT_FOUND;
pub use router::build_router;
pub use runner::{ServerError, build_state, run, serve};
