pub mod api; // HTTP API (axum)
pub mod config;
pub mod extraction; // Safety data sheet text extraction
pub mod guidance; // Exam tables, matcher, result view

use tracing_subscriber::EnvFilter;

/// Initialize tracing. Logs go to stderr so CLI output stays clean.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
