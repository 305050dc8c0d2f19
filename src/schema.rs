//! Declarative operation schemas
//!
//! Every carrier operation is described by a [`Schema`]: the fields its
//! builder writes, where each one lands in the payload, and how enumerated
//! values are policed. One generic builder engine consumes these tables.

use std::fmt;

use crate::builder::error::{BuilderError, BuilderResult};

/// Allowed values for unit-of-measurement fields
pub const UNITS_OF_MEASUREMENT: &[&str] = &["metric", "imperial"];

/// Default unit of measurement
pub const DEFAULT_UNIT_OF_MEASUREMENT: &str = "metric";

/// Unit-of-measurement policy shared by every operation that carries one
pub const UNIT_OF_MEASUREMENT_POLICY: FieldPolicy = FieldPolicy::Normalize {
    allowed: UNITS_OF_MEASUREMENT,
    default: DEFAULT_UNIT_OF_MEASUREMENT,
};

/// How a field treats values outside its enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Any value is accepted
    Free,
    /// Values outside `allowed` fail the setter
    Reject { allowed: &'static [&'static str] },
    /// Values outside `allowed` are replaced by `default`
    Normalize {
        allowed: &'static [&'static str],
        default: &'static str,
    },
}

impl FieldPolicy {
    /// Whether the field has an enumeration at all
    pub fn is_enumerated(&self) -> bool {
        !matches!(self, FieldPolicy::Free)
    }

    /// The allowed values, if enumerated
    pub fn allowed(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldPolicy::Free => None,
            FieldPolicy::Reject { allowed } | FieldPolicy::Normalize { allowed, .. } => {
                Some(*allowed)
            }
        }
    }

    /// Apply the policy to `value`, returning what should be stored.
    pub fn apply(&self, field: &str, value: &str) -> BuilderResult<String> {
        match self {
            FieldPolicy::Free => Ok(value.to_string()),
            FieldPolicy::Reject { allowed } => {
                if allowed.contains(&value) {
                    Ok(value.to_string())
                } else {
                    Err(BuilderError::Validation {
                        field: field.to_string(),
                        value: value.to_string(),
                        allowed: allowed.iter().map(|s| s.to_string()).collect(),
                    })
                }
            }
            FieldPolicy::Normalize { allowed, default } => {
                if allowed.contains(&value) {
                    Ok(value.to_string())
                } else {
                    tracing::debug!(
                        "Value '{}' not allowed for '{}', using default '{}'",
                        value,
                        field,
                        default
                    );
                    Ok(default.to_string())
                }
            }
        }
    }
}

/// Computed part of a field write, applied by the engine on every write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Derive {
    /// The value is stored as given
    #[default]
    None,
    /// Each appended mapping gets this key set to its 1-based position
    Numbered(&'static str),
    /// The value is also written at this second path
    Mirror(&'static str),
    /// A date-time moved to the carrier's planned shipping time
    /// (see [`crate::builder::rating::adjusted_shipping_time`])
    ShippingTime,
}

/// One settable field of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name of the field
    pub name: &'static str,
    /// Where the field is written, in [`crate::payload::FieldPath`] syntax
    pub path: &'static str,
    pub policy: FieldPolicy,
    pub derive: Derive,
}

impl FieldSpec {
    pub const fn free(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            policy: FieldPolicy::Free,
            derive: Derive::None,
        }
    }

    pub const fn with_policy(name: &'static str, path: &'static str, policy: FieldPolicy) -> Self {
        Self {
            name,
            path,
            policy,
            derive: Derive::None,
        }
    }

    /// Number appended items under `key`
    pub const fn numbered(self, key: &'static str) -> Self {
        Self {
            derive: Derive::Numbered(key),
            ..self
        }
    }

    /// Copy every write to `path` as well
    pub const fn mirrored(self, path: &'static str) -> Self {
        Self {
            derive: Derive::Mirror(path),
            ..self
        }
    }

    pub const fn shipping_time(self) -> Self {
        Self {
            derive: Derive::ShippingTime,
            ..self
        }
    }
}

/// Field table for one carrier operation
#[derive(Debug)]
pub struct Schema {
    pub operation: Operation,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Look up a field by its wire name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field, failing with [`BuilderError::UnknownField`]
    pub fn require(&self, name: &str) -> BuilderResult<&'static FieldSpec> {
        self.field(name).ok_or_else(|| BuilderError::UnknownField {
            operation: self.operation,
            field: name.to_string(),
        })
    }
}

/// Carrier operations supported by the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Rating,
    LandedCost,
    Pickup,
    DomesticShipment,
    InternationalShipment,
    AddressValidation,
    Tracking,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::Rating,
        Operation::LandedCost,
        Operation::Pickup,
        Operation::DomesticShipment,
        Operation::InternationalShipment,
        Operation::AddressValidation,
        Operation::Tracking,
    ];

    /// Stable name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Rating => "getRates",
            Operation::LandedCost => "getPriceDetails",
            Operation::Pickup => "createPickUpRequest",
            Operation::DomesticShipment => "createDomesticShipping",
            Operation::InternationalShipment => "createInternationalShipping",
            Operation::AddressValidation => "validateAddress",
            Operation::Tracking => "shipmentTracking",
        }
    }

    /// Fixed carrier endpoint for this operation
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Operation::Rating => Endpoint::body("rates"),
            Operation::LandedCost => Endpoint::body("landed-cost"),
            Operation::Pickup => Endpoint::body("pickups"),
            Operation::DomesticShipment | Operation::InternationalShipment => {
                Endpoint::body("shipments")
            }
            Operation::AddressValidation => Endpoint::query("address-validate"),
            Operation::Tracking => Endpoint {
                language_header: true,
                ..Endpoint::query("tracking")
            },
        }
    }

    /// Field table for this operation
    pub fn schema(&self) -> &'static Schema {
        use crate::builder::{address, landed_cost, pickup, rating, shipment, tracking};

        match self {
            Operation::Rating => &rating::RATING_SCHEMA,
            Operation::LandedCost => &landed_cost::LANDED_COST_SCHEMA,
            Operation::Pickup => &pickup::PICKUP_SCHEMA,
            Operation::DomesticShipment => &shipment::DOMESTIC_SHIPMENT_SCHEMA,
            Operation::InternationalShipment => &shipment::INTERNATIONAL_SHIPMENT_SCHEMA,
            Operation::AddressValidation => &address::ADDRESS_VALIDATION_SCHEMA,
            Operation::Tracking => &tracking::TRACKING_SCHEMA,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// HTTP methods used by carrier endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the payload travels in the HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// JSON request body
    Body,
    /// URL query string
    Query,
}

/// Method, path and payload placement of a carrier endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// Path relative to the carrier base URL
    pub path: &'static str,
    pub disposition: Disposition,
    /// Lift the `Accept-Language` payload field into a request header
    pub language_header: bool,
}

impl Endpoint {
    const fn body(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            disposition: Disposition::Body,
            language_header: false,
        }
    }

    const fn query(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            disposition: Disposition::Query,
            language_header: false,
        }
    }
}
