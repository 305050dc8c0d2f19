//! Rating request builder (`POST rates`)

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use super::error::BuilderResult;
use super::{OperationBuilder, RequestBuilder};
use crate::models::{Account, Package, PostalAddress};
use crate::schema::{FieldSpec, Operation, Schema, UNIT_OF_MEASUREMENT_POLICY};

/// Days added to the caller's shipping time before it is sent
pub const SHIPPING_DAY_OFFSET: u64 = 4;

/// Time of day every planned shipping time is moved to
pub const SHIPPING_TIME_OF_DAY: &str = "15:00:00";

pub static RATING_SCHEMA: Schema = Schema {
    operation: Operation::Rating,
    fields: &[
        FieldSpec::free("shipperDetails", "customerDetails.shipperDetails"),
        FieldSpec::free("receiverDetails", "customerDetails.receiverDetails"),
        FieldSpec::free("accounts", "accounts"),
        FieldSpec::free("plannedShippingDateAndTime", "plannedShippingDateAndTime")
            .shipping_time(),
        FieldSpec::with_policy(
            "unitOfMeasurement",
            "unitOfMeasurement",
            UNIT_OF_MEASUREMENT_POLICY,
        ),
        FieldSpec::free("isCustomsDeclarable", "isCustomsDeclarable"),
        FieldSpec::free("requestAllValueAddedServices", "requestAllValueAddedServices"),
        FieldSpec::free("returnStandardProductsOnly", "returnStandardProductsOnly"),
        FieldSpec::free("nextBusinessDay", "nextBusinessDay"),
        FieldSpec::free("packages", "packages"),
    ],
};

/// Shipping time actually sent for a requested time: the date moved
/// [`SHIPPING_DAY_OFFSET`] days ahead, the clock set to
/// [`SHIPPING_TIME_OF_DAY`], no offset.
///
/// Returns `None` when the moved date is past the last representable date.
///
/// ```rust
/// use carrier_request_sdk::builder::rating::adjusted_shipping_time;
/// use chrono::NaiveDateTime;
///
/// let at = NaiveDateTime::parse_from_str("2024-01-01T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
/// assert_eq!(adjusted_shipping_time(at).as_deref(), Some("2024-01-05T15:00:00"));
/// ```
pub fn adjusted_shipping_time(requested: NaiveDateTime) -> Option<String> {
    let date = requested
        .date()
        .checked_add_days(Days::new(SHIPPING_DAY_OFFSET))?;
    Some(format!("{}T{}", date.format("%Y-%m-%d"), SHIPPING_TIME_OF_DAY))
}

/// Parse a caller-supplied shipping time.
///
/// Accepts RFC 3339 (the offset is dropped, local wall time kept),
/// `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds, the same with a
/// space separator, and a bare `YYYY-MM-DD` (midnight).
pub fn parse_shipping_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Wire shape of the rating origin
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShipperLocation<'a> {
    postal_code: &'a str,
    city_name: &'a str,
    country_code: &'a str,
    province_code: &'a str,
    address_line1: &'a str,
}

impl<'a> From<&'a PostalAddress> for ShipperLocation<'a> {
    fn from(address: &'a PostalAddress) -> Self {
        Self {
            postal_code: &address.postal_code,
            city_name: &address.city_name,
            country_code: &address.country_code,
            province_code: address
                .province_code
                .as_deref()
                .unwrap_or(address.country_code.as_str()),
            address_line1: line1_or_city(address),
        }
    }
}

/// Wire shape of the rating destination
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiverLocation<'a> {
    postal_code: &'a str,
    city_name: &'a str,
    address_line1: &'a str,
    country_code: &'a str,
}

impl<'a> From<&'a PostalAddress> for ReceiverLocation<'a> {
    fn from(address: &'a PostalAddress) -> Self {
        Self {
            postal_code: &address.postal_code,
            city_name: &address.city_name,
            address_line1: line1_or_city(address),
            country_code: &address.country_code,
        }
    }
}

fn line1_or_city(address: &PostalAddress) -> &str {
    address
        .address_line1
        .as_deref()
        .unwrap_or(address.city_name.as_str())
}

/// Builder for rate quotes
#[derive(Debug, Clone)]
pub struct RatingRequestBuilder {
    inner: RequestBuilder,
}

impl Default for RatingRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RatingRequestBuilder {
    pub fn new() -> Self {
        Self {
            inner: RequestBuilder::new(&RATING_SCHEMA),
        }
    }

    /// Origin of the shipment.
    ///
    /// `provinceCode` falls back to the country code and `addressLine1` to
    /// the city name when the address does not carry them.
    pub fn shipper_details(&mut self, address: &PostalAddress) -> &mut Self {
        let location = serde_json::to_value(ShipperLocation::from(address)).unwrap_or_default();
        self.inner.put("shipperDetails", location);
        self
    }

    /// Destination of the shipment. `addressLine1` falls back to the city name.
    pub fn receiver_details(&mut self, address: &PostalAddress) -> &mut Self {
        let location = serde_json::to_value(ReceiverLocation::from(address)).unwrap_or_default();
        self.inner.put("receiverDetails", location);
        self
    }

    pub fn accounts(&mut self, account: &Account) -> &mut Self {
        self.inner.put("accounts", account.to_accounts_payload());
        self
    }

    /// Planned shipping time, sent as [`adjusted_shipping_time`] of `requested`.
    ///
    /// Fails with [`super::BuilderError::InvalidValue`] when the moved date
    /// does not exist.
    pub fn planned_shipping_date_and_time(
        &mut self,
        requested: NaiveDateTime,
    ) -> BuilderResult<&mut Self> {
        self.inner.set_field(
            "plannedShippingDateAndTime",
            requested.format("%Y-%m-%dT%H:%M:%S").to_string(),
        )?;
        Ok(self)
    }

    /// `metric` (kg, cm) or `imperial` (lb, in); anything else becomes `metric`
    pub fn unit_of_measurement(&mut self, unit: &str) -> BuilderResult<&mut Self> {
        self.inner.set_field("unitOfMeasurement", unit)?;
        Ok(self)
    }

    /// Whether the goods must be declared to customs (international)
    pub fn is_customs_declarable(&mut self, declarable: bool) -> &mut Self {
        self.inner.put("isCustomsDeclarable", declarable);
        self
    }

    /// Legacy flag asking for every value-added service of each product
    pub fn request_all_value_added_services(&mut self, requested: bool) -> &mut Self {
        self.inner.put("requestAllValueAddedServices", requested);
        self
    }

    pub fn return_standard_products_only(&mut self, standard_only: bool) -> &mut Self {
        self.inner.put("returnStandardProductsOnly", standard_only);
        self
    }

    pub fn next_business_day(&mut self, next_business_day: bool) -> &mut Self {
        self.inner.put("nextBusinessDay", next_business_day);
        self
    }

    /// The package being rated. Replaces any earlier package.
    pub fn packages(&mut self, package: &Package) -> &mut Self {
        self.inner
            .put("packages", Value::Array(vec![package.to_payload()]));
        self
    }
}

impl OperationBuilder for RatingRequestBuilder {
    fn engine(&self) -> &RequestBuilder {
        &self.inner
    }

    fn engine_mut(&mut self) -> &mut RequestBuilder {
        &mut self.inner
    }
}
