//! Carrier transport
//!
//! [`CarrierTransport`] sends finished payloads to the fixed carrier
//! endpoints and normalizes what comes back. It holds no per-request state:
//! one instance can serve any number of concurrent calls.
//!
//! ```rust,no_run
//! # #[cfg(feature = "api-backend")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use carrier_request_sdk::builder::{OperationBuilder, TrackingRequestBuilder};
//! use carrier_request_sdk::config::CarrierConfig;
//! use carrier_request_sdk::transport::{CallOptions, CarrierResponse, CarrierTransport};
//!
//! let transport = CarrierTransport::new(CarrierConfig::from_env()?);
//!
//! let mut tracking = TrackingRequestBuilder::new();
//! tracking.tracking_number("1234567890").language("eng");
//!
//! match transport.shipment_tracking(&tracking.finalize(), &CallOptions::default()).await? {
//!     CarrierResponse::Success(document) => println!("{document}"),
//!     CarrierResponse::CarrierError { status, body, .. } => eprintln!("{status}: {body}"),
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::auth::CredentialProvider;
use crate::builder::tracking::ACCEPT_LANGUAGE_FIELD;
use crate::builder::{OperationBuilder, OperationRequest};
use crate::config::DEFAULT_ACCEPT_LANGUAGE;
use crate::payload::PayloadDocument;
use crate::schema::{Disposition, Operation};

pub mod backend;
pub mod error;
#[cfg(feature = "api-backend")]
pub mod http;

pub use backend::{HttpBackend, HttpCall, RawResponse};
pub use error::{TransportError, TransportResult};
#[cfg(feature = "api-backend")]
pub use http::ReqwestBackend;

/// Header carrying the per-call correlation id
pub const MESSAGE_REFERENCE_HEADER: &str = "Message-Reference";

/// Normalized carrier answer
#[derive(Debug, Clone, PartialEq)]
pub enum CarrierResponse {
    /// 2xx; the decoded body (`Null` for an empty body)
    Success(Value),
    /// Non-2xx; the raw body and, when it is JSON, its decoded form
    CarrierError {
        status: u16,
        body: String,
        detail: Option<Value>,
    },
}

impl CarrierResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, CarrierResponse::Success(_))
    }

    /// The decoded document of a successful call
    pub fn success(&self) -> Option<&Value> {
        match self {
            CarrierResponse::Success(document) => Some(document),
            CarrierResponse::CarrierError { .. } => None,
        }
    }

    pub fn into_success(self) -> Option<Value> {
        match self {
            CarrierResponse::Success(document) => Some(document),
            CarrierResponse::CarrierError { .. } => None,
        }
    }

    /// HTTP status of a carrier error
    pub fn error_status(&self) -> Option<u16> {
        match self {
            CarrierResponse::Success(_) => None,
            CarrierResponse::CarrierError { status, .. } => Some(*status),
        }
    }

    /// The carrier's `detail` message, when the error body carries one
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            CarrierResponse::CarrierError {
                detail: Some(detail),
                ..
            } => detail.get("detail").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Turn a raw exchange into a [`CarrierResponse`]
pub fn normalize_response(raw: RawResponse) -> TransportResult<CarrierResponse> {
    if raw.is_success() {
        if raw.body.trim().is_empty() {
            return Ok(CarrierResponse::Success(Value::Null));
        }
        let document = serde_json::from_str(&raw.body).map_err(|e| {
            TransportError::InvalidResponse(format!("HTTP {} body is not JSON: {}", raw.status, e))
        })?;
        return Ok(CarrierResponse::Success(document));
    }

    let detail = serde_json::from_str(&raw.body).ok();
    Ok(CarrierResponse::CarrierError {
        status: raw.status,
        body: raw.body,
        detail,
    })
}

/// Flatten the top level of `payload` into query pairs.
///
/// Null values are skipped; nested mappings and sequences are rejected.
pub fn flatten_query(payload: &PayloadDocument) -> TransportResult<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (key, value) in payload.as_map() {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(TransportError::UnsupportedQueryValue { field: key.clone() });
            }
        };
        pairs.push((key.clone(), text));
    }
    Ok(pairs)
}

/// Per-call settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Overrides the transport's default timeout
    pub timeout: Option<Duration>,
}

impl CallOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// HTTP client wrapper for the carrier API
pub struct CarrierTransport<B: HttpBackend> {
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    backend: B,
    timeout: Option<Duration>,
    accept_language: String,
}

#[cfg(feature = "api-backend")]
impl CarrierTransport<ReqwestBackend> {
    /// Transport on the default reqwest backend
    pub fn new(config: crate::config::CarrierConfig) -> Self {
        Self::with_backend(config, ReqwestBackend::new())
    }
}

impl<B: HttpBackend> CarrierTransport<B> {
    /// Transport for `config` on a custom backend
    pub fn with_backend(config: crate::config::CarrierConfig, backend: B) -> Self {
        let base_url = config.base_url.clone();
        let timeout = config.timeout();
        let accept_language = config.accept_language.clone();
        Self {
            base_url,
            credentials: Arc::new(config),
            backend,
            timeout,
            accept_language,
        }
    }

    /// Transport from individual collaborators, with no default timeout
    pub fn from_parts(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        backend: B,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            backend,
            timeout: None,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }

    /// Default timeout for calls that do not set one
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Tracking language for requests that do not name one
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send `request` to its endpoint.
    ///
    /// Non-2xx answers come back as [`CarrierResponse::CarrierError`];
    /// `Err` means no usable answer was obtained.
    pub async fn execute(
        &self,
        request: &OperationRequest,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        let endpoint = request.endpoint;
        let credentials = self.credentials.credentials()?;
        let message_reference = Uuid::new_v4().to_string();

        let mut headers = vec![
            (
                "Authorization".to_string(),
                credentials.authorization_header(),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                MESSAGE_REFERENCE_HEADER.to_string(),
                message_reference.clone(),
            ),
        ];

        let mut payload = request.payload.clone();
        if endpoint.language_header {
            let language = match payload.remove(ACCEPT_LANGUAGE_FIELD) {
                Some(Value::String(language)) => language,
                Some(Value::Null) | None => self.accept_language.clone(),
                Some(other) => other.to_string(),
            };
            headers.push(("Accept-Language".to_string(), language));
        }

        let (query, body) = match endpoint.disposition {
            Disposition::Query => (flatten_query(&payload)?, None),
            Disposition::Body => (Vec::new(), Some(payload.into_value())),
        };

        let url = self.url_for(endpoint.path);
        tracing::debug!(
            "Sending {} {} {} (message reference {})",
            request.operation,
            endpoint.method,
            url,
            message_reference
        );

        let call = HttpCall {
            method: endpoint.method,
            url,
            headers,
            query,
            body,
            timeout: options.timeout.or(self.timeout),
        };
        let raw = self.backend.send(call).await?;

        tracing::debug!(
            "{} answered HTTP {} (message reference {})",
            request.operation,
            raw.status,
            message_reference
        );
        if !raw.is_success() {
            tracing::warn!(
                "Carrier rejected {} with HTTP {} (message reference {})",
                request.operation,
                raw.status,
                message_reference
            );
        }

        normalize_response(raw)
    }

    /// Finalize `builder` and send the result
    pub async fn send<O: OperationBuilder>(
        &self,
        builder: &O,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.execute(&builder.request(), options).await
    }

    async fn call(
        &self,
        operation: Operation,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.execute(&OperationRequest::new(operation, payload.clone()), options)
            .await
    }

    /// `POST rates`
    pub async fn get_rates(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::Rating, payload, options).await
    }

    /// `POST landed-cost`
    pub async fn get_price_details(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::LandedCost, payload, options).await
    }

    /// `POST pickups`
    pub async fn create_pickup_request(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::Pickup, payload, options).await
    }

    /// `POST shipments`
    pub async fn create_domestic_shipping(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::DomesticShipment, payload, options).await
    }

    /// `POST shipments`
    pub async fn create_international_shipping(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::InternationalShipment, payload, options)
            .await
    }

    /// `GET address-validate`, payload as query string
    pub async fn validate_address(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::AddressValidation, payload, options)
            .await
    }

    /// `GET tracking`, payload as query string and `Accept-Language` header
    pub async fn shipment_tracking(
        &self,
        payload: &PayloadDocument,
        options: &CallOptions,
    ) -> TransportResult<CarrierResponse> {
        self.call(Operation::Tracking, payload, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn document(value: Value) -> PayloadDocument {
        match value {
            Value::Object(map) => PayloadDocument::from_map(map),
            _ => PayloadDocument::from_map(Map::new()),
        }
    }

    #[test]
    fn test_normalize_success() {
        let response = normalize_response(RawResponse::new(200, r#"{"products": []}"#)).unwrap();
        assert_eq!(response, CarrierResponse::Success(json!({"products": []})));
    }

    #[test]
    fn test_normalize_empty_success() {
        let response = normalize_response(RawResponse::new(204, "")).unwrap();
        assert_eq!(response.success(), Some(&Value::Null));
    }

    #[test]
    fn test_normalize_undecodable_success() {
        let err = normalize_response(RawResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, TransportError::InvalidResponse(_)));
    }

    #[test]
    fn test_normalize_carrier_error() {
        let body = r#"{"detail":"not found"}"#;
        let response = normalize_response(RawResponse::new(404, body)).unwrap();
        assert_eq!(response.error_status(), Some(404));
        assert_eq!(response.error_detail(), Some("not found"));
        match response {
            CarrierResponse::CarrierError { body: raw, .. } => assert_eq!(raw, body),
            other => panic!("Expected carrier error, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_plain_text_error() {
        let response = normalize_response(RawResponse::new(503, "Service Unavailable")).unwrap();
        assert_eq!(
            response,
            CarrierResponse::CarrierError {
                status: 503,
                body: "Service Unavailable".to_string(),
                detail: None,
            }
        );
    }

    #[test]
    fn test_flatten_query_scalars() {
        let payload = document(json!({
            "type": "delivery",
            "strictValidation": true,
            "postalCode": 52802,
            "countyName": null
        }));
        let mut pairs = flatten_query(&payload).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("postalCode".to_string(), "52802".to_string()),
                ("strictValidation".to_string(), "true".to_string()),
                ("type".to_string(), "delivery".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_query_rejects_nested() {
        let payload = document(json!({"packages": [{"weight": 1}]}));
        assert_eq!(
            flatten_query(&payload).unwrap_err(),
            TransportError::UnsupportedQueryValue {
                field: "packages".to_string()
            }
        );
    }
}
