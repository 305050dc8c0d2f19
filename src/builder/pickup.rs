//! Pickup request builder (`POST pickups`)
//!
//! The planned pickup time must not be in the past or more than 10 days
//! ahead, and the close time must be at least two hours after it. Neither
//! rule is checked here; the carrier enforces them.

use super::error::BuilderResult;
use super::{OperationBuilder, RequestBuilder};
use crate::models::{Account, ContactInfo, Package, PostalAddress};
use crate::schema::{FieldSpec, Operation, Schema, UNIT_OF_MEASUREMENT_POLICY};

pub static PICKUP_SCHEMA: Schema = Schema {
    operation: Operation::Pickup,
    fields: &[
        FieldSpec::free("plannedPickupDateAndTime", "plannedPickupDateAndTime"),
        FieldSpec::free("closeTime", "closeTime"),
        FieldSpec::free("location", "location"),
        FieldSpec::free("locationType", "locationType"),
        FieldSpec::free("remark", "remark"),
        FieldSpec::free(
            "shipperPostalAddress",
            "customerDetails.shipperDetails.postalAddress",
        ),
        FieldSpec::free(
            "shipperContactInformation",
            "customerDetails.shipperDetails.contactInformation",
        ),
        FieldSpec::free(
            "receiverPostalAddress",
            "customerDetails.receiverDetails.postalAddress",
        ),
        FieldSpec::free(
            "receiverContactInformation",
            "customerDetails.receiverDetails.contactInformation",
        ),
        FieldSpec::free(
            "bookingRequestorPostalAddress",
            "customerDetails.bookingRequestorDetails.postalAddress",
        ),
        FieldSpec::free(
            "bookingRequestorContactInformation",
            "customerDetails.bookingRequestorDetails.contactInformation",
        ),
        FieldSpec::free(
            "pickupPostalAddress",
            "customerDetails.pickupDetails.postalAddress",
        ),
        FieldSpec::free(
            "pickupContactInformation",
            "customerDetails.pickupDetails.contactInformation",
        ),
        FieldSpec::free("productCode", "shipmentDetails[0].productCode"),
        FieldSpec::free("localProductCode", "shipmentDetails[0].localProductCode"),
        FieldSpec::free("isCustomsDeclarable", "shipmentDetails[0].isCustomsDeclarable"),
        FieldSpec::free("declaredValue", "shipmentDetails[0].declaredValue"),
        FieldSpec::free(
            "declaredValueCurrency",
            "shipmentDetails[0].declaredValueCurrency",
        ),
        FieldSpec::with_policy(
            "unitOfMeasurement",
            "shipmentDetails[0].unitOfMeasurement",
            UNIT_OF_MEASUREMENT_POLICY,
        ),
        FieldSpec::free("packages", "shipmentDetails[0].packages[]"),
        FieldSpec::free("accounts", "accounts").mirrored("shipmentDetails[0].accounts"),
    ],
};

/// Builder for courier pickup bookings
#[derive(Debug, Clone)]
pub struct PickupRequestBuilder {
    inner: RequestBuilder,
}

impl Default for PickupRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PickupRequestBuilder {
    pub fn new() -> Self {
        Self {
            inner: RequestBuilder::new(&PICKUP_SCHEMA),
        }
    }

    /// When the package is ready, e.g. `2024-08-20T14:00:31`
    pub fn planned_pickup_date_and_time(&mut self, at: &str) -> &mut Self {
        self.inner.put("plannedPickupDateAndTime", at);
        self
    }

    /// Latest pickup time, `HH:mm`
    pub fn close_time(&mut self, close_time: &str) -> &mut Self {
        self.inner.put("closeTime", close_time);
        self
    }

    /// Where at the address the package waits (max 80 characters)
    pub fn location(&mut self, location: &str) -> &mut Self {
        self.inner.put("location", location);
        self
    }

    /// `business` or `residence`
    pub fn location_type(&mut self, location_type: &str) -> &mut Self {
        self.inner.put("locationType", location_type);
        self
    }

    pub fn remark(&mut self, remark: &str) -> &mut Self {
        self.inner.put("remark", remark);
        self
    }

    pub fn shipper_postal_details(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("shipperPostalAddress", address.to_payload());
        self
    }

    pub fn shipper_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("shipperContactInformation", contact.to_payload());
        self
    }

    pub fn receiver_postal_details(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("receiverPostalAddress", address.to_payload());
        self
    }

    pub fn receiver_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("receiverContactInformation", contact.to_payload());
        self
    }

    pub fn booking_requestor_postal_details(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner
            .put("bookingRequestorPostalAddress", address.to_payload());
        self
    }

    pub fn booking_requestor_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("bookingRequestorContactInformation", contact.to_payload());
        self
    }

    pub fn pickup_postal_details(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("pickupPostalAddress", address.to_payload());
        self
    }

    pub fn pickup_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("pickupContactInformation", contact.to_payload());
        self
    }

    /// Global and local product codes of the shipment, as returned by rating
    pub fn shipment_product_code(
        &mut self,
        product_code: &str,
        local_product_code: &str,
    ) -> &mut Self {
        self.inner
            .put("productCode", product_code)
            .put("localProductCode", local_product_code);
        self
    }

    /// Whether the shipment is dutiable
    pub fn shipment_is_customs_declarable(&mut self, declarable: bool) -> &mut Self {
        self.inner.put("isCustomsDeclarable", declarable);
        self
    }

    /// Declared value; required for customs-declarable shipments
    pub fn shipment_declared_value(&mut self, value: f64) -> &mut Self {
        self.inner.put("declaredValue", value);
        self
    }

    /// Three-letter currency of the declared value
    pub fn shipment_declared_value_currency(&mut self, currency: &str) -> &mut Self {
        self.inner.put("declaredValueCurrency", currency);
        self
    }

    /// `metric` or `imperial`; anything else becomes `metric`
    pub fn shipment_unit_of_measurement(&mut self, unit: &str) -> BuilderResult<&mut Self> {
        self.inner.set_field("unitOfMeasurement", unit)?;
        Ok(self)
    }

    /// Add a package to the shipment
    pub fn shipment_package(&mut self, package: &Package) -> &mut Self {
        self.inner.put("packages", package.to_payload());
        self
    }

    /// Billing account, written both to the request and to the shipment
    pub fn accounts(&mut self, account: &Account) -> &mut Self {
        self.inner.put("accounts", account.to_accounts_payload());
        self
    }
}

impl OperationBuilder for PickupRequestBuilder {
    fn engine(&self) -> &RequestBuilder {
        &self.inner
    }

    fn engine_mut(&mut self) -> &mut RequestBuilder {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accounts_written_twice() {
        let mut builder = PickupRequestBuilder::new();
        builder.accounts(&Account::shipper("123456789"));
        let doc = builder.finalize();
        let top = doc.get("accounts").unwrap();
        assert_eq!(top, &json!([{"typeCode": "shipper", "number": "123456789"}]));
        assert_eq!(doc.get("shipmentDetails[0].accounts"), Some(top));
    }

    #[test]
    fn test_shipment_details_share_one_element() {
        let mut builder = PickupRequestBuilder::new();
        builder
            .shipment_product_code("D", "D")
            .shipment_is_customs_declarable(true)
            .shipment_declared_value(200.0)
            .shipment_declared_value_currency("USD")
            .shipment_package(&Package::new(15.0).with_dimensions(22.0, 22.0, 55.0))
            .shipment_package(&Package::new(3.0));
        builder.shipment_unit_of_measurement("imperial").unwrap();

        let doc = builder.finalize();
        assert_eq!(doc.sequence_len("shipmentDetails"), 1);
        assert_eq!(doc.sequence_len("shipmentDetails[0].packages"), 2);
        assert_eq!(
            doc.get_str("shipmentDetails[0].unitOfMeasurement"),
            Some("imperial")
        );
        assert_eq!(doc.get("shipmentDetails[0].declaredValue"), Some(&json!(200.0)));
    }

    #[test]
    fn test_accounts_mirrored_through_set_field() {
        let mut builder = PickupRequestBuilder::new();
        builder
            .engine_mut()
            .set_field("accounts", json!([{"typeCode": "shipper", "number": "987"}]))
            .unwrap();
        let doc = builder.finalize();
        assert_eq!(
            doc.get_str("shipmentDetails[0].accounts[0].number"),
            Some("987")
        );
        assert_eq!(doc.get("accounts"), doc.get("shipmentDetails[0].accounts"));
    }

    #[test]
    fn test_party_paths() {
        let mut builder = PickupRequestBuilder::new();
        builder
            .booking_requestor_postal_details(&PostalAddress::new("14800", "Prague", "CZ"))
            .pickup_contact_information(
                &ContactInfo::new("+155454811", "Company Name", "Jane Smith")
                    .with_email("test@example.com"),
            );
        let doc = builder.finalize();
        assert_eq!(
            doc.get_str("customerDetails.bookingRequestorDetails.postalAddress.cityName"),
            Some("Prague")
        );
        assert_eq!(
            doc.get_str("customerDetails.pickupDetails.contactInformation.email"),
            Some("test@example.com")
        );
    }
}
