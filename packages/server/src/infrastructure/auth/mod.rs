//! Token authentication for WebSocket sessions.

pub mod jwt;

pub use jwt::{AuthError, Claims, JwtValidator, issue_token};
