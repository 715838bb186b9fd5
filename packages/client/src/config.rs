//! Command line configuration of the client.

use clap::{ArgGroup, Parser};

use crate::error::ClientError;

/// Terminal chat client
#[derive(Parser, Clone, Debug)]
#[command(name = "chathub-client", version, about = "Terminal chat client")]
#[command(group(ArgGroup::new("target").required(true).args(["chat_id", "group_id"])))]
pub struct ClientConfig {
    /// Server base URL
    #[arg(long, env = "CHATHUB_URL", default_value = "ws://127.0.0.1:4545")]
    pub url: String,

    /// Chat to join
    #[arg(long)]
    pub chat_id: Option<String>,

    /// User group whose chat to join
    #[arg(long)]
    pub group_id: Option<i64>,

    /// HS512 token; its subject replaces --sender on the server side
    #[arg(long, env = "CHATHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Sender id attached to outgoing messages
    #[arg(long, env = "CHATHUB_SENDER")]
    pub sender: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "CHATHUB_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl ClientConfig {
    /// WebSocket URL of the selected chat.
    pub fn endpoint(&self) -> Result<String, ClientError> {
        let base = self.url.trim_end_matches('/');
        let path = match (&self.chat_id, self.group_id) {
            (Some(chat_id), _) => format!("/api/chats/{chat_id}/ws"),
            (None, Some(group_id)) => format!("/api/user-groups/{group_id}/ws"),
            (None, None) => return Err(ClientError::MissingTarget),
        };
        Ok(match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => format!("{base}{path}?token={token}"),
            None => format!("{base}{path}"),
        })
    }
}
