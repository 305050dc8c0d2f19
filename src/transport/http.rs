//! reqwest-backed [`HttpBackend`]

use async_trait::async_trait;

use super::backend::{HttpBackend, HttpCall, RawResponse};
use super::error::{TransportError, TransportResult};
use crate::schema::HttpMethod;

/// HTTP backend on a shared, pooled `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, TLS roots, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, call: HttpCall) -> TransportResult<RawResponse> {
        let method = match call.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut request = self.client.request(method, &call.url);
        for (name, value) in &call.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }
        if let Some(timeout) = call.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify(e, &call, "Failed to send request"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, &call, "Failed to read response body"))?;

        Ok(RawResponse { status, body })
    }
}

/// Map a reqwest failure onto the transport taxonomy.
///
/// A timeout is only reported as [`TransportError::Timeout`] when the call
/// set one; a timeout configured on a caller-supplied client is a plain
/// request failure.
fn classify(error: reqwest::Error, call: &HttpCall, context: &str) -> TransportError {
    if error.is_timeout() {
        match call.timeout {
            Some(timeout) => TransportError::Timeout(timeout),
            None => TransportError::Request(format!("{}: {}", context, error)),
        }
    } else if error.is_connect() {
        TransportError::Connection(format!("Failed to connect to {}: {}", call.url, error))
    } else {
        TransportError::Request(format!("{}: {}", context, error))
    }
}
