//! HTTP server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;
use tokio::task::JoinHandle;

use crate::config::ServiceConfig;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Handle to a running server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    handle: Handle,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Address the listener is actually bound to (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Underlying axum-server handle, for wiring up signal handlers.
    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Stop accepting connections and let in-flight requests finish.
    pub fn shutdown(&self, grace: Duration) {
        self.handle.graceful_shutdown(Some(grace));
    }

    /// Wait until the server has stopped.
    pub async fn wait(self) -> Result<(), ServerError> {
        match self.task.await {
            Ok(result) => result.map_err(|e| ServerError::Server(e.to_string())),
            Err(e) => Err(ServerError::Server(format!("server task failed: {}", e))),
        }
    }
}

/// Bind the listener and start serving `app` in the background.
///
/// Binding happens before this returns, so a port that is already taken is
/// reported as [`ServerError::Bind`] rather than surfacing later.
pub async fn start_server(app: Router, config: &ServiceConfig) -> Result<ServerHandle, ServerError> {
    let listener = std::net::TcpListener::bind(config.bind_addr())?;
    listener.set_nonblocking(true)?;
    let local_addr = listener.local_addr()?;

    let handle = Handle::new();
    let server = axum_server::from_tcp(listener).handle(handle.clone());
    let task = tokio::spawn(
        server.serve(app.into_make_service_with_connect_info::<SocketAddr>()),
    );

    tracing::info!(%local_addr, "App running on port {}", local_addr.port());

    Ok(ServerHandle {
        local_addr,
        handle,
        task,
    })
}
