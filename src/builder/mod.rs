//! Request builders
//!
//! [`RequestBuilder`] is the generic engine: it accumulates a
//! [`PayloadDocument`] through path writes and schema-driven field writes,
//! then hands out deep snapshots. The per-operation builders in the
//! submodules are thin typed facades over it.
//!
//! # Example
//!
//! ```rust
//! use carrier_request_sdk::builder::{AddressValidationRequestBuilder, OperationBuilder};
//!
//! let mut builder = AddressValidationRequestBuilder::new();
//! builder
//!     .set_type("pickup")?
//!     .country_code("SA")
//!     .postal_code("52802")
//!     .city_name("Aba Alworood");
//!
//! let payload = builder.finalize();
//! assert_eq!(payload.get_str("type"), Some("pickup"));
//! # Ok::<(), carrier_request_sdk::BuilderError>(())
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::payload::{FieldPath, PayloadDocument};
use crate::schema::{Derive, Endpoint, FieldPolicy, FieldSpec, Operation, Schema};

pub mod address;
pub mod error;
pub mod landed_cost;
pub mod pickup;
pub mod rating;
pub mod shipment;
pub mod tracking;

pub use address::AddressValidationRequestBuilder;
pub use error::{BuilderError, BuilderResult};
pub use landed_cost::LandedCostRequestBuilder;
pub use pickup::PickupRequestBuilder;
pub use rating::RatingRequestBuilder;
pub use shipment::{
    Domestic, DomesticShipmentBuilder, International, InternationalShipmentBuilder,
    ShipmentBuilder,
};
pub use tracking::TrackingRequestBuilder;

/// Generic payload accumulator for one carrier operation
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    schema: &'static Schema,
    overrides: HashMap<&'static str, FieldPolicy>,
    document: PayloadDocument,
}

impl RequestBuilder {
    /// Create an empty builder for the operation described by `schema`
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            overrides: HashMap::new(),
            document: PayloadDocument::new(),
        }
    }

    /// Create an empty builder for `operation`
    pub fn for_operation(operation: Operation) -> Self {
        Self::new(operation.schema())
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn operation(&self) -> Operation {
        self.schema.operation
    }

    /// Write `value` at `path`, creating intermediate nodes.
    ///
    /// Append paths (`[]`) push a new element; any other path overwrites.
    pub fn set(&mut self, path: impl Into<FieldPath>, value: impl Into<Value>) -> &mut Self {
        self.document.set(&path.into(), value.into());
        self
    }

    /// Push `value` onto the sequence at `path`
    pub fn append(&mut self, path: impl Into<FieldPath>, value: impl Into<Value>) -> &mut Self {
        self.document.append(&path.into(), value.into());
        self
    }

    /// Push `item` onto the sequence at `path`, numbering it.
    ///
    /// `number_key` is set to the sequence length before the push plus one,
    /// replacing whatever the caller put there.
    pub fn append_numbered(
        &mut self,
        path: impl Into<FieldPath>,
        mut item: Map<String, Value>,
        number_key: &str,
    ) -> &mut Self {
        let path = path.into().without_append();
        let number = self.document.sequence_len(&path) + 1;
        item.insert(number_key.to_string(), Value::from(number));
        self.document.append(&path, Value::Object(item));
        self
    }

    /// Effective policy of `field`, including caller overrides
    pub fn policy(&self, field: &str) -> BuilderResult<FieldPolicy> {
        let spec = self.schema.require(field)?;
        Ok(self
            .overrides
            .get(spec.name)
            .copied()
            .unwrap_or(spec.policy))
    }

    /// Replace the policy of an enumerated field for this builder.
    ///
    /// Fields declared without an enumeration keep accepting any value.
    pub fn override_policy(
        &mut self,
        field: &str,
        policy: FieldPolicy,
    ) -> BuilderResult<&mut Self> {
        let spec = self.schema.require(field)?;
        if !spec.policy.is_enumerated() {
            return Err(BuilderError::NotEnumerated(spec.name.to_string()));
        }
        self.overrides.insert(spec.name, policy);
        Ok(self)
    }

    /// Check `value` against the effective policy of `field`.
    ///
    /// Returns the value that would be stored: `value` itself, or the
    /// field's default under a normalizing policy.
    pub fn validate(&self, field: &str, value: &str) -> BuilderResult<String> {
        self.policy(field)?.apply(field, value)
    }

    /// Schema-driven write of `field`.
    ///
    /// Enumerated fields are validated first and computed fields derived
    /// from `value`; a failure leaves the document untouched. Fields with an
    /// append path push a new element.
    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> BuilderResult<&mut Self> {
        let spec = self.schema.require(field)?;
        let policy = self.policy(field)?;
        let value = value.into();

        let value = if policy.is_enumerated() {
            Value::String(policy.apply(spec.name, &value_text(&value))?)
        } else {
            value
        };

        let path = FieldPath::parse(spec.path);
        match spec.derive {
            Derive::None => self.document.set(&path, value),
            Derive::Numbered(key) => match value {
                Value::Object(item) => {
                    self.append_numbered(path, item, key);
                }
                other => return Err(invalid_value(spec, &other, "expected a mapping")),
            },
            Derive::Mirror(mirror) => {
                self.document.set(&FieldPath::parse(mirror), value.clone());
                self.document.set(&path, value);
            }
            Derive::ShippingTime => {
                let stored = value
                    .as_str()
                    .and_then(rating::parse_shipping_time)
                    .and_then(rating::adjusted_shipping_time)
                    .ok_or_else(|| invalid_value(spec, &value, SHIPPING_TIME_HINT))?;
                self.document.set(&path, Value::String(stored));
            }
        }
        Ok(self)
    }

    /// Schema-driven write from a typed setter.
    ///
    /// Typed setters only pass values their field accepts; a write that
    /// still fails is logged and dropped.
    pub(crate) fn put(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        let written = self.set_field(field, value).map(|_| ());
        if let Err(err) = written {
            tracing::error!("Dropped write to '{}' on {}: {}", field, self.operation(), err);
        }
        self
    }

    /// Read the value currently stored at `path`
    pub fn get(&self, path: impl Into<FieldPath>) -> Option<&Value> {
        self.document.get(path)
    }

    /// Deep snapshot of the accumulated document.
    ///
    /// The snapshot shares nothing with the builder, so later setter calls
    /// never show up in documents already handed out.
    pub fn finalize(&self) -> PayloadDocument {
        self.document.clone()
    }

    /// Snapshot plus the endpoint metadata the transport needs
    pub fn request(&self) -> OperationRequest {
        OperationRequest::new(self.operation(), self.finalize())
    }
}

const SHIPPING_TIME_HINT: &str = "expected a date-time such as 2024-01-01T10:00:00";

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn invalid_value(spec: &FieldSpec, value: &Value, reason: &str) -> BuilderError {
    BuilderError::InvalidValue {
        field: spec.name.to_string(),
        value: value_text(value),
        reason: reason.to_string(),
    }
}

/// Common surface of the typed per-operation builders
pub trait OperationBuilder {
    /// The underlying generic engine
    fn engine(&self) -> &RequestBuilder;

    /// Mutable access to the engine, for dynamic field writes and policy overrides
    fn engine_mut(&mut self) -> &mut RequestBuilder;

    fn operation(&self) -> Operation {
        self.engine().operation()
    }

    /// Deep snapshot of the payload built so far
    fn finalize(&self) -> PayloadDocument {
        self.engine().finalize()
    }

    /// Snapshot plus endpoint metadata
    fn request(&self) -> OperationRequest {
        self.engine().request()
    }
}

/// A finalized payload bound to its carrier endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub endpoint: Endpoint,
    pub payload: PayloadDocument,
}

impl OperationRequest {
    pub fn new(operation: Operation, payload: PayloadDocument) -> Self {
        Self {
            operation,
            endpoint: operation.endpoint(),
            payload,
        }
    }
}
