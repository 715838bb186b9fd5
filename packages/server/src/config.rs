//! Command line / environment configuration of the server.

use std::{net::IpAddr, time::Duration};

use clap::{ArgAction, Parser};

use crate::ui::state::SessionSettings;

/// Real-time chat server
#[derive(Parser, Clone, Debug)]
#[command(name = "chathub-server", version, about = "Real-time chat server")]
pub struct ServerConfig {
    /// Bind address
    #[arg(long, env = "CHATHUB_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: IpAddr,

    /// Port to listen on
    #[arg(long, env = "CHATHUB_PORT", default_value_t = 4545)]
    pub port: u16,

    /// SQLite database URL
    #[arg(
        long,
        env = "CHATHUB_DATABASE_URL",
        default_value = "sqlite://chathub.db?mode=rwc"
    )]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "CHATHUB_MAX_CONNECTIONS", default_value_t = 16)]
    pub max_connections: u32,

    /// HS512 secret used to validate connection tokens
    #[arg(long, env = "CHATHUB_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Require a token on every WebSocket connection
    #[arg(
        long,
        env = "CHATHUB_REQUIRE_AUTH",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub require_auth: bool,

    /// Capacity of the broadcast queue; messages beyond it are dropped
    #[arg(long, env = "CHATHUB_QUEUE_CAPACITY", default_value_t = 256)]
    pub queue_capacity: usize,

    /// Seconds without an inbound frame before a session is closed
    #[arg(long, env = "CHATHUB_IDLE_TIMEOUT_SECS", default_value_t = 300)]
    pub idle_timeout_secs: u64,

    /// Messages buffered per session; a session that falls further behind is evicted
    #[arg(long, env = "CHATHUB_OUTBOUND_CAPACITY", default_value_t = 64)]
    pub outbound_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "CHATHUB_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.require_auth && self.jwt_secret.as_deref().is_none_or(str::is_empty) {
            return Err("--jwt-secret is required when --require-auth is true".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("--queue-capacity must be at least 1".to_string());
        }
        if self.idle_timeout_secs == 0 {
            return Err("--idle-timeout-secs must be at least 1".to_string());
        }
        if self.outbound_capacity == 0 {
            return Err("--outbound-capacity must be at least 1".to_string());
        }
        if self.max_connections == 0 {
            return Err("--max-connections must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            require_auth: self.require_auth,
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            outbound_capacity: self.outbound_capacity,
        }
    }
}
