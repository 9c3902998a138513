/// Application-level constants
pub const APP_NAME: &str = "HCMS 특수건강검진 자동안내";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the bundled exam tables.
pub const TABLES_ENV: &str = "HCMS_GUIDE_TABLES";
/// Environment variable for the API bind address.
pub const ADDR_ENV: &str = "HCMS_GUIDE_ADDR";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Largest accepted request body (safety data sheet uploads).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "info,hcms_guide=debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_parses() {
        let addr: std::net::SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn default_log_filter_is_valid() {
        assert!(tracing_subscriber::EnvFilter::try_new(default_log_filter()).is_ok());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }
}
