use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "CareRoute";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Defaults, overridable from the environment.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ORACLE_MODEL: &str = "llama3.2:3b";

/// Request timeout for advisory oracle calls.
pub const ORACLE_TIMEOUT_SECS: u64 = 30;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "careroute=info,tower_http=warn"
}

/// Socket address the API server binds to (`CAREROUTE_BIND`).
pub fn bind_addr() -> SocketAddr {
    std::env::var("CAREROUTE_BIND")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is valid")
        })
}

/// Base URL of the advisory model server, if one is configured
/// (`CAREROUTE_ORACLE_URL`). `None` means run deterministic-only.
pub fn oracle_base_url() -> Option<String> {
    std::env::var("CAREROUTE_ORACLE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Model name used for advisory generation (`CAREROUTE_ORACLE_MODEL`).
pub fn oracle_model() -> String {
    std::env::var("CAREROUTE_ORACLE_MODEL").unwrap_or_else(|_| DEFAULT_ORACLE_MODEL.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_careroute() {
        assert_eq!(APP_NAME, "CareRoute");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
