//! Wire representations (JSON) of the domain model.

pub mod http;
pub mod websocket;
