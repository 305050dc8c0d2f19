//! HTTP backend abstraction
//!
//! The transport describes each exchange as an [`HttpCall`] and hands it to
//! an [`HttpBackend`]. The reqwest implementation lives in
//! [`super::http`]; tests plug in their own.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::error::TransportResult;
use crate::schema::HttpMethod;

/// One fully resolved HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCall {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// JSON body, for body-disposition operations
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

impl HttpCall {
    /// First header named `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// First query parameter named `name`
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs HTTP exchanges for the transport.
///
/// Any status the server answers with is a successful exchange; errors are
/// for calls that never produced a response.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, call: HttpCall) -> TransportResult<RawResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let call = HttpCall {
            method: HttpMethod::Get,
            url: "http://localhost/tracking".to_string(),
            headers: vec![("Accept-Language".to_string(), "eng".to_string())],
            query: vec![("shipmentTrackingNumber".to_string(), "123".to_string())],
            body: None,
            timeout: None,
        };
        assert_eq!(call.header("accept-language"), Some("eng"));
        assert_eq!(call.query_param("shipmentTrackingNumber"), Some("123"));
        assert_eq!(call.query_param("missing"), None);
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(201, "{}").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
    }
}
