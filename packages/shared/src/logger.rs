//! Logging bootstrap shared by every binary in the workspace.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when it is set; otherwise events from `bin_name` and the
/// workspace crates are emitted at `default_level`, everything else at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(default_directives(bin_name, default_level))
    });

    // A second call (e.g. from several tests in one process) is a no-op.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init();
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let bin_target = bin_name.replace('-', "_");
    format!(
        "warn,{bin_target}={default_level},chathub_server={default_level},chathub_client={default_level},chathub_shared={default_level},tower_http={default_level}"
    )
}
