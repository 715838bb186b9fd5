//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chathub-client -- --chat-id <id> --sender alice
//! ```

use chathub_client::ClientConfig;
use chathub_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ClientConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    if let Err(e) = chathub_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
