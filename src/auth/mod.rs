//! Carrier API credentials
//!
//! The carrier authenticates every call with HTTP Basic auth. Credentials
//! are handed to the transport through [`CredentialProvider`] so they can
//! come from configuration, a secrets store or a test fixture.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::transport::TransportResult;

/// Username / password pair for HTTP Basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value of the `Authorization` header
    ///
    /// ```rust
    /// use carrier_request_sdk::auth::BasicCredentials;
    ///
    /// let credentials = BasicCredentials::new("user", "pass");
    /// assert_eq!(credentials.authorization_header(), "Basic dXNlcjpwYXNz");
    /// ```
    pub fn authorization_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }
}

// Never show the password
impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Source of the credentials used for each carrier call
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> TransportResult<BasicCredentials>;
}

impl CredentialProvider for BasicCredentials {
    fn credentials(&self) -> TransportResult<BasicCredentials> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let credentials = BasicCredentials::new("apiuser", "s3cret");
        let expected = format!("Basic {}", STANDARD.encode("apiuser:s3cret"));
        assert_eq!(credentials.authorization_header(), expected);
    }

    #[test]
    fn test_empty_credentials_still_encode() {
        // The colon separator is always present
        assert_eq!(
            BasicCredentials::new("", "").authorization_header(),
            "Basic Og=="
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", BasicCredentials::new("apiuser", "s3cret"));
        assert!(debug.contains("apiuser"));
        assert!(!debug.contains("s3cret"));
    }
}
