//! Small request-metadata helpers shared by the analytics endpoints.

use std::net::SocketAddr;

use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;

/// Best-effort client IP: first `X-Forwarded-For` hop when present,
/// otherwise the peer address. No trusted-proxy filtering — this serves a
/// single-admin deployment behind at most one reverse proxy.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "192.0.2.7:55000".parse().unwrap()
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        assert_eq!(client_ip(&HeaderMap::new(), peer()), "192.0.2.7");
    }

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.4, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers, peer()), "203.0.113.4");
    }

    #[test]
    fn test_client_ip_ignores_empty_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_ip(&headers, peer()), "192.0.2.7");
    }

    #[test]
    fn test_user_agent_read_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        assert_eq!(user_agent(&headers).as_deref(), Some("Mozilla/5.0"));
        assert_eq!(user_agent(&HeaderMap::new()), None);
    }
}
