//! Client address resolution.
//!
//! The service sits behind a load balancer (CloudFront, ALB, nginx...) that
//! appends the address it received the request from to `X-Forwarded-For`.
//! The leftmost entry is therefore the original client, and that is what the
//! index page shows. Without the header we fall back to the socket peer.
//!
//! The header is client-controlled unless the fronting proxy overwrites it,
//! so the resolved value is for display only. Never use it to make an
//! authorization or rate-limiting decision.

use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use http::request::Parts;
use http::HeaderMap;

use crate::config::X_FORWARDED_FOR;

/// Resolve the address to display for a request.
///
/// `peer` is the transport-level remote address, `forwarded_for` the raw
/// `X-Forwarded-For` value if any. A present, non-empty header wins: its first
/// comma-separated entry is returned with surrounding whitespace trimmed.
/// Nothing is validated, so a malformed chain yields whatever its first
/// segment is (possibly the empty string).
pub fn resolve_client_address(peer: &str, forwarded_for: Option<&str>) -> String {
    match forwarded_for {
        Some(chain) if !chain.is_empty() => chain
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string(),
        _ => peer.to_string(),
    }
}

/// Collect every `X-Forwarded-For` line into one chain.
///
/// Repeated header lines are joined in order with `", "`, the same folding
/// HTTP stacks apply, so the first entry of the first line stays leftmost.
/// Bytes outside visible ASCII are decoded lossily rather than rejected.
pub fn forwarded_for_chain(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<Cow<'_, str>> = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(", "))
    }
}

/// Format the transport peer as a bare IP, without the port.
pub fn peer_address(connect_info: Option<&ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

/// Resolved client address, extracted from the request.
///
/// Reads the peer from `ConnectInfo<SocketAddr>` (present when the router is
/// served with `into_make_service_with_connect_info`) and the forwarding
/// header. Extraction never fails; with neither source the address is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

impl ClientAddress {
    pub fn from_parts(parts: &Parts) -> Self {
        let peer = peer_address(parts.extensions.get::<ConnectInfo<SocketAddr>>());
        let chain = forwarded_for_chain(&parts.headers);
        Self(resolve_client_address(&peer, chain.as_deref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientAddress
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn parts_with(headers: &[(&str, &str)], peer: Option<&str>) -> Parts {
        let mut builder = http::Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if let Some(peer) = peer {
            let addr: SocketAddr = peer.parse().unwrap();
            builder = builder.extension(ConnectInfo(addr));
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_first_forwarded_entry_wins() {
        assert_eq!(
            resolve_client_address("10.1.1.1", Some("203.0.113.5, 10.0.0.1, 10.0.0.2")),
            "203.0.113.5"
        );
    }

    #[test]
    fn test_no_header_uses_peer() {
        assert_eq!(resolve_client_address("127.0.0.1", None), "127.0.0.1");
    }

    #[test]
    fn test_single_entry() {
        assert_eq!(
            resolve_client_address("127.0.0.1", Some("198.51.100.7")),
            "198.51.100.7"
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            resolve_client_address("127.0.0.1", Some("  203.0.113.9 ,10.0.0.1")),
            "203.0.113.9"
        );
    }

    #[test]
    fn test_empty_header_falls_back_to_peer() {
        assert_eq!(resolve_client_address("192.0.2.1", Some("")), "192.0.2.1");
    }

    #[test]
    fn test_malformed_chain_degrades_to_empty() {
        // Leading comma: first segment is empty, not an error
        assert_eq!(resolve_client_address("192.0.2.1", Some(", 10.0.0.1")), "");
        assert_eq!(resolve_client_address("192.0.2.1", Some("   ")), "");
    }

    #[test]
    fn test_unvalidated_value_passes_through() {
        assert_eq!(
            resolve_client_address("192.0.2.1", Some("not-an-ip, 10.0.0.1")),
            "not-an-ip"
        );
    }

    #[test]
    fn test_no_sources_yields_empty() {
        assert_eq!(resolve_client_address("", None), "");
    }

    #[test]
    fn test_extractor_prefers_header() {
        let parts = parts_with(&[("X-Forwarded-For", "203.0.113.5, 10.0.0.1")], Some("10.9.9.9:4000"));
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "203.0.113.5");
    }

    #[test]
    fn test_extractor_header_name_is_case_insensitive() {
        let parts = parts_with(&[("x-FORWARDED-for", "198.51.100.7")], Some("10.9.9.9:4000"));
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "198.51.100.7");
    }

    #[test]
    fn test_extractor_peer_without_port() {
        let parts = parts_with(&[], Some("127.0.0.1:51234"));
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "127.0.0.1");

        let parts = parts_with(&[], Some("[::1]:51234"));
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "::1");
    }

    #[test]
    fn test_extractor_without_connect_info() {
        let parts = parts_with(&[], None);
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "");
    }

    #[test]
    fn test_obs_text_header_is_kept() {
        let mut parts = parts_with(&[], Some("10.9.9.9:1"));
        parts.headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_bytes(b"caf\xe9, 10.0.0.1").unwrap(),
        );
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "caf\u{FFFD}");
    }

    #[test]
    fn test_obs_text_first_line_still_wins() {
        let mut parts = parts_with(&[], Some("10.9.9.9:1"));
        parts.headers.append(
            X_FORWARDED_FOR,
            HeaderValue::from_bytes(b"\xff\xfe").unwrap(),
        );
        parts
            .headers
            .append(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.1"));
        assert_eq!(
            forwarded_for_chain(&parts.headers).as_deref(),
            Some("\u{FFFD}\u{FFFD}, 203.0.113.1")
        );
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_repeated_header_lines_are_folded() {
        let parts = parts_with(
            &[
                ("X-Forwarded-For", "203.0.113.1"),
                ("X-Forwarded-For", "10.0.0.1"),
            ],
            Some("10.9.9.9:4000"),
        );
        assert_eq!(
            forwarded_for_chain(&parts.headers).as_deref(),
            Some("203.0.113.1, 10.0.0.1")
        );
        assert_eq!(ClientAddress::from_parts(&parts).as_str(), "203.0.113.1");
    }
}
