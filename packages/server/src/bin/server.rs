//! Real-time chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chathub-server -- --jwt-secret <secret>
//! ```

use chathub_server::ServerConfig;
use chathub_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = chathub_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
