//! Error types for carrier transport
//!
//! These cover failures to complete an HTTP exchange at all. A carrier that
//! answers with a non-2xx status is not an error here; it comes back as
//! [`super::CarrierResponse::CarrierError`].

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while calling the carrier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Failed to connect to the carrier API
    #[error("Failed to connect to carrier API: {0}")]
    Connection(String),

    /// The per-call timeout elapsed
    #[error("Carrier request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be sent or its response not read
    #[error("Carrier request failed: {0}")]
    Request(String),

    /// A 2xx response whose body is not a JSON document
    #[error("Invalid carrier response: {0}")]
    InvalidResponse(String),

    /// A query-string payload holding a nested value
    #[error("Field '{field}' cannot be sent as a query parameter: only scalar values are supported")]
    UnsupportedQueryValue { field: String },

    /// Credentials could not be obtained
    #[error("Credentials unavailable: {0}")]
    Credentials(String),
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(30)).to_string(),
            "Carrier request timed out after 30s"
        );
        assert_eq!(
            TransportError::Timeout(Duration::from_millis(200)).to_string(),
            "Carrier request timed out after 200ms"
        );
        assert_eq!(
            TransportError::UnsupportedQueryValue {
                field: "packages".to_string()
            }
            .to_string(),
            "Field 'packages' cannot be sent as a query parameter: only scalar values are supported"
        );
    }
}
