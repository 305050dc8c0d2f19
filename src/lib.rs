//! Carrier Request SDK - typed request builders and HTTP transport for the
//! DHL Express API
//!
//! Provides:
//! - Request builders that assemble carrier payloads through chained setters
//! - Declarative per-operation schemas (field paths and enumeration policies)
//! - A transport that sends finished payloads and normalizes the responses
//! - Credentials and connection configuration (code, environment, TOML)
//!
//! # Example
//!
//! ```rust
//! use carrier_request_sdk::{
//!     Account, OperationBuilder, Package, PostalAddress, RatingRequestBuilder,
//! };
//! use chrono::NaiveDateTime;
//!
//! let at = NaiveDateTime::parse_from_str("2024-01-01T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
//!
//! let mut rating = RatingRequestBuilder::new();
//! rating
//!     .shipper_details(&PostalAddress::new("", "Makkah", "SA"))
//!     .receiver_details(&PostalAddress::new("", "Riyadh", "SA"))
//!     .accounts(&Account::shipper("123456789"))
//!     .packages(&Package::new(5.0))
//!     .planned_shipping_date_and_time(at)?
//!     .unit_of_measurement("metric")?;
//!
//! let payload = rating.finalize();
//! assert_eq!(payload.get_str("plannedShippingDateAndTime"), Some("2024-01-05T15:00:00"));
//! # Ok::<(), carrier_request_sdk::BuilderError>(())
//! ```

pub mod auth;
pub mod builder;
pub mod config;
pub mod models;
pub mod payload;
pub mod schema;
pub mod transport;

// Re-export builders
pub use builder::{
    AddressValidationRequestBuilder, BuilderError, BuilderResult, DomesticShipmentBuilder,
    InternationalShipmentBuilder, LandedCostRequestBuilder, OperationBuilder, OperationRequest,
    PickupRequestBuilder, RatingRequestBuilder, RequestBuilder, ShipmentBuilder,
    TrackingRequestBuilder,
};

// Re-export payload and schema types
pub use payload::{FieldPath, PathSegment, PayloadDocument};
pub use schema::{
    Derive, Disposition, Endpoint, FieldPolicy, FieldSpec, HttpMethod, Operation, Schema,
};

// Re-export models
pub use models::{
    Account, ContactInfo, Dimensions, OutputImageProperties, Package, PostalAddress,
};

// Re-export transport, config and credentials
pub use auth::{BasicCredentials, CredentialProvider};
pub use config::{CarrierConfig, ConfigError};
#[cfg(feature = "api-backend")]
pub use transport::ReqwestBackend;
pub use transport::{
    CallOptions, CarrierResponse, CarrierTransport, HttpBackend, HttpCall, RawResponse,
    TransportError, TransportResult,
};
