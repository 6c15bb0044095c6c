//! ip-checker: tells callers which IP address their request came from.
//!
//! The client address is taken from the first `X-Forwarded-For` entry when a
//! proxy supplied one, otherwise from the TCP peer. `GET /health` serves as
//! the load balancer's liveness probe.

pub mod client_ip;
pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;

pub use client_ip::{resolve_client_address, ClientAddress};
pub use config::ServiceConfig;
pub use error::AppError;
