//! Configuration constants and runtime settings.
//!
//! The service has a single tunable that matters in production: the port it
//! listens on. Everything else here is either a compile-time constant or a
//! knob for local development (bind host, log filter and format).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::ValueEnum;
use const_format::formatcp;

// =============================================================================
// Listener
// =============================================================================

/// Port used when neither `--port` nor `PORT` is given
pub const DEFAULT_PORT: u16 = 3000;

/// Bind on every interface so a load balancer can reach the instance
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Seconds to wait for in-flight requests after a shutdown signal
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// HTTP
// =============================================================================

/// Proxy header carrying the client/proxy address chain
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Responses are per-client (index) or must always be fresh (health)
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Name under which the index page template is registered
pub const INDEX_TEMPLATE: &str = "index.html";

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when neither `--log-level` nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = formatcp!(
    "{}=info,tower_http=info",
    env!("CARGO_CRATE_NAME")
);

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Runtime settings for the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }

    /// Socket address to bind the listener to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
