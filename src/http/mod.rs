//! HTTP server lifecycle.
//!
//! Binds the listener, serves the router with peer address info attached,
//! and hands back a [`ServerHandle`] the caller uses to find the bound
//! address, trigger a graceful shutdown, and wait for the server to exit.
//! TLS is terminated upstream, so this only ever speaks plain HTTP.

mod server;
mod shutdown;

pub use server::{start_server, ServerError, ServerHandle};
pub use shutdown::setup_shutdown_handler;
