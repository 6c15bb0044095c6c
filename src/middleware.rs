//! Request ID middleware for correlating logs with requests.
//!
//! Every request gets a UUID v4 and a tracing span carrying the method, path
//! and resolved client address, so the completion line (and anything logged
//! by handlers) can be tied back to a single caller.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderValue;
use tracing::Instrument;
use uuid::Uuid;

use crate::client_ip::ClientAddress;

/// Response header carrying the request ID, so callers can quote it.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that generates a request ID and wraps the request in a span.
///
/// The ID is echoed back in [`REQUEST_ID_HEADER`]. Install as the outermost
/// layer so the span covers the whole request.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let (parts, body) = request.into_parts();
    let client = ClientAddress::from_parts(&parts);
    let request = Request::from_parts(parts, body);

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        client = %client.as_str(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}
