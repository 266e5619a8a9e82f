//! REST API module.
//!
//! Versioned read-only routes under `/api/1.0/`.

mod index;
mod records;

pub use index::*;
pub use records::*;

use axum::http::{header, HeaderMap};

use crate::models::RequestContext;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Build the request context used for self links.
///
/// Proxy headers win over `Host`; without any host the links stay relative.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let host = header_str(FORWARDED_HOST).or_else(|| header_str(header::HOST.as_str()));
    let scheme = header_str(FORWARDED_PROTO).unwrap_or("http");

    RequestContext::new(host.map(|host| format!("{}://{}", scheme, host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_context_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("irei.example:8080"));

        let ctx = request_context(&headers);

        assert_eq!(ctx.record_url("1-1"), "http://irei.example:8080/api/1.0/1-1");
    }

    #[test]
    fn test_context_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.7:8080"));
        headers.insert(FORWARDED_HOST, HeaderValue::from_static("irei.densho.org"));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https, http"));

        let ctx = request_context(&headers);

        assert_eq!(ctx.record_url("1-1"), "https://irei.densho.org/api/1.0/1-1");
    }

    #[test]
    fn test_context_without_host() {
        let ctx = request_context(&HeaderMap::new());
        assert_eq!(ctx.record_url("1-1"), "/api/1.0/1-1");
    }
}
