//! Shared utilities for the Chathub server and client.

pub mod logger;
pub mod time;
