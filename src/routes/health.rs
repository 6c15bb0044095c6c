//! Health check endpoint for the load balancer.

use http::StatusCode;

/// Liveness probe.
///
/// Returns 200 with an empty body as long as the process can answer HTTP.
/// There are no downstream dependencies to check.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
