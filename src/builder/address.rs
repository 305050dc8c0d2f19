//! Address validation request builder (`GET address-validate`)

use super::error::BuilderResult;
use super::{OperationBuilder, RequestBuilder};
use crate::schema::{FieldPolicy, FieldSpec, Operation, Schema};

/// Allowed values for the address validation `type`
pub const ADDRESS_VALIDATION_TYPES: &[&str] = &["pickup", "delivery"];

pub static ADDRESS_VALIDATION_SCHEMA: Schema = Schema {
    operation: Operation::AddressValidation,
    fields: &[
        FieldSpec::with_policy(
            "type",
            "type",
            FieldPolicy::Reject {
                allowed: ADDRESS_VALIDATION_TYPES,
            },
        ),
        FieldSpec::free("countryCode", "countryCode"),
        FieldSpec::free("postalCode", "postalCode"),
        FieldSpec::free("cityName", "cityName"),
        FieldSpec::free("countyName", "countyName"),
        FieldSpec::free("strictValidation", "strictValidation"),
    ],
};

/// Builder for address validation queries
#[derive(Debug, Clone)]
pub struct AddressValidationRequestBuilder {
    inner: RequestBuilder,
}

impl Default for AddressValidationRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressValidationRequestBuilder {
    pub fn new() -> Self {
        Self {
            inner: RequestBuilder::new(&ADDRESS_VALIDATION_SCHEMA),
        }
    }

    /// Whether the address is validated as a `pickup` or a `delivery` location.
    ///
    /// Any other value fails with [`super::BuilderError::Validation`] and
    /// leaves the stored type unchanged.
    pub fn set_type(&mut self, validation_type: &str) -> BuilderResult<&mut Self> {
        self.inner.set_field("type", validation_type)?;
        Ok(self)
    }

    pub fn country_code(&mut self, country_code: &str) -> &mut Self {
        self.inner.put("countryCode", country_code);
        self
    }

    pub fn postal_code(&mut self, postal_code: &str) -> &mut Self {
        self.inner.put("postalCode", postal_code);
        self
    }

    pub fn city_name(&mut self, city_name: &str) -> &mut Self {
        self.inner.put("cityName", city_name);
        self
    }

    pub fn county_name(&mut self, county_name: &str) -> &mut Self {
        self.inner.put("countyName", county_name);
        self
    }

    pub fn strict_validation(&mut self, strict: bool) -> &mut Self {
        self.inner.put("strictValidation", strict);
        self
    }
}

impl OperationBuilder for AddressValidationRequestBuilder {
    fn engine(&self) -> &RequestBuilder {
        &self.inner
    }

    fn engine_mut(&mut self) -> &mut RequestBuilder {
        &mut self.inner
    }
}
