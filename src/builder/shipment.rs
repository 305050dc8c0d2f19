//! Shipment creation builders (`POST shipments`)
//!
//! Domestic and international shipments share most of their payload. One
//! generic [`ShipmentBuilder`] carries the common setters and the
//! [`Domestic`] / [`International`] markers add the parts only one of them
//! has.

use std::marker::PhantomData;

use serde_json::{Map, Value, json};

use super::error::BuilderResult;
use super::{OperationBuilder, RequestBuilder};
use crate::models::{Account, ContactInfo, OutputImageProperties, Package, PostalAddress};
use crate::schema::{FieldSpec, Operation, Schema, UNIT_OF_MEASUREMENT_POLICY};

/// Incoterm sent when the caller does not pick one
pub const DEFAULT_INCOTERM: &str = "DAP";

pub static DOMESTIC_SHIPMENT_SCHEMA: Schema = Schema {
    operation: Operation::DomesticShipment,
    fields: &[
        FieldSpec::free("plannedShippingDateAndTime", "plannedShippingDateAndTime"),
        FieldSpec::free("pickupRequested", "pickup.isRequested"),
        FieldSpec::free("encodingFormat", "outputImageProperties.encodingFormat"),
        FieldSpec::free("imageOptions", "outputImageProperties.imageOptions"),
        FieldSpec::free("invoice", "content.exportDeclaration.invoice"),
        FieldSpec::free("lineItems", "content.exportDeclaration.lineItems[]").numbered("number"),
        FieldSpec::free("productCode", "productCode"),
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
        FieldSpec::free("isCustomsDeclarable", "content.isCustomsDeclarable"),
        FieldSpec::free("declaredValue", "content.declaredValue"),
        FieldSpec::free("declaredValueCurrency", "content.declaredValueCurrency"),
        FieldSpec::with_policy(
            "unitOfMeasurement",
            "content.unitOfMeasurement",
            UNIT_OF_MEASUREMENT_POLICY,
        ),
        FieldSpec::free("packages", "content.packages"),
        FieldSpec::free("description", "content.description"),
        FieldSpec::free("accounts", "accounts"),
    ],
};

pub static INTERNATIONAL_SHIPMENT_SCHEMA: Schema = Schema {
    operation: Operation::InternationalShipment,
    fields: &[
        FieldSpec::free("plannedShippingDateAndTime", "plannedShippingDateAndTime"),
        FieldSpec::free("pickupRequested", "pickup.isRequested"),
        FieldSpec::free("pickupCloseTime", "pickup.closeTime"),
        FieldSpec::free("pickupPostalAddress", "pickup.pickupDetails.postalAddress"),
        FieldSpec::free(
            "pickupContactInformation",
            "pickup.pickupDetails.contactInformation",
        ),
        FieldSpec::free("encodingFormat", "outputImageProperties.encodingFormat"),
        FieldSpec::free("imageOptions", "outputImageProperties.imageOptions"),
        FieldSpec::free("invoice", "content.exportDeclaration.invoice"),
        FieldSpec::free("lineItems", "content.exportDeclaration.lineItems[]").numbered("number"),
        FieldSpec::free("productCode", "productCode"),
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
        FieldSpec::free("isCustomsDeclarable", "content.isCustomsDeclarable"),
        FieldSpec::free("declaredValue", "content.declaredValue"),
        FieldSpec::free("declaredValueCurrency", "content.declaredValueCurrency"),
        FieldSpec::with_policy(
            "unitOfMeasurement",
            "content.unitOfMeasurement",
            UNIT_OF_MEASUREMENT_POLICY,
        ),
        FieldSpec::free("packages", "content.packages"),
        FieldSpec::free("description", "content.description"),
        FieldSpec::free("incoterm", "content.incoterm"),
        FieldSpec::free("accounts", "accounts"),
    ],
};

/// Kind of shipment a [`ShipmentBuilder`] produces
pub trait ShipmentKind {
    const OPERATION: Operation;
}

/// Shipment within one country
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Domestic;

/// Cross-border shipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct International;

impl ShipmentKind for Domestic {
    const OPERATION: Operation = Operation::DomesticShipment;
}

impl ShipmentKind for International {
    const OPERATION: Operation = Operation::InternationalShipment;
}

pub type DomesticShipmentBuilder = ShipmentBuilder<Domestic>;
pub type InternationalShipmentBuilder = ShipmentBuilder<International>;

/// Builder for shipment creation requests
#[derive(Debug, Clone)]
pub struct ShipmentBuilder<K: ShipmentKind> {
    inner: RequestBuilder,
    kind: PhantomData<K>,
}

impl<K: ShipmentKind> Default for ShipmentBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ShipmentKind> ShipmentBuilder<K> {
    pub fn new() -> Self {
        Self {
            inner: RequestBuilder::for_operation(K::OPERATION),
            kind: PhantomData,
        }
    }

    /// Shipping time, sent as given (e.g. `2024-08-20T14:00:31GMT+01:00`)
    pub fn planned_shipping_date_and_time(&mut self, at: &str) -> &mut Self {
        self.inner.put("plannedShippingDateAndTime", at);
        self
    }

    /// Whether a courier pickup is booked with the shipment
    pub fn pickup_requested(&mut self, requested: bool) -> &mut Self {
        self.inner.put("pickupRequested", requested);
        self
    }

    /// Label format plus the invoice and waybill document options
    pub fn output_image_properties(&mut self, properties: &OutputImageProperties) -> &mut Self {
        self.inner
            .put("encodingFormat", properties.encoding_format.as_str())
            .put("imageOptions", properties.image_options_payload());
        self
    }

    /// Commercial invoice of the export declaration.
    ///
    /// Only the `invoice` entry is written; line items added before are kept.
    pub fn export_declaration_invoice(&mut self, date: &str, number: &str) -> &mut Self {
        self.inner
            .put("invoice", json!({"date": date, "number": number}));
        self
    }

    /// Add a line item to the export declaration.
    ///
    /// Items are numbered from 1 in insertion order; a `number` in `item`
    /// is replaced.
    pub fn export_declaration_line_item(&mut self, item: Map<String, Value>) -> &mut Self {
        self.inner.put("lineItems", Value::Object(item));
        self
    }

    pub fn product_code(&mut self, product_code: &str) -> &mut Self {
        self.inner.put("productCode", product_code);
        self
    }

    pub fn shipper_postal_address(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("shipperPostalAddress", address.to_payload());
        self
    }

    pub fn shipper_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("shipperContactInformation", contact.to_payload());
        self
    }

    pub fn receiver_postal_address(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("receiverPostalAddress", address.to_payload());
        self
    }

    pub fn receiver_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("receiverContactInformation", contact.to_payload());
        self
    }

    /// Declared value and its three-letter currency
    pub fn shipment_customs_declarable_data(&mut self, value: f64, currency: &str) -> &mut Self {
        self.inner
            .put("declaredValue", value)
            .put("declaredValueCurrency", currency);
        self
    }

    /// `metric` or `imperial`; anything else becomes `metric`
    pub fn shipment_unit_of_measurement(&mut self, unit: &str) -> BuilderResult<&mut Self> {
        self.inner.set_field("unitOfMeasurement", unit)?;
        Ok(self)
    }

    /// The shipped package. Replaces any earlier package.
    pub fn shipment_package(&mut self, package: &Package) -> &mut Self {
        self.inner
            .put("packages", Value::Array(vec![package.to_payload()]));
        self
    }

    pub fn accounts(&mut self, account: &Account) -> &mut Self {
        self.inner.put("accounts", account.to_accounts_payload());
        self
    }
}

impl ShipmentBuilder<Domestic> {
    pub fn shipment_is_customs_declarable(&mut self, declarable: bool) -> &mut Self {
        self.inner.put("isCustomsDeclarable", declarable);
        self
    }

    /// Free-text description of the contents
    pub fn package_description(&mut self, description: &str) -> &mut Self {
        self.inner.put("description", description);
        self
    }
}

impl ShipmentBuilder<International> {
    /// Latest pickup time, `HH:mm`
    pub fn pickup_close_time(&mut self, close_time: &str) -> &mut Self {
        self.inner.put("pickupCloseTime", close_time);
        self
    }

    pub fn pickup_postal_address(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("pickupPostalAddress", address.to_payload());
        self
    }

    pub fn pickup_contact_information(&mut self, contact: &ContactInfo) -> &mut Self {
        self.inner
            .put("pickupContactInformation", contact.to_payload());
        self
    }

    /// Dutiability together with the description customs will see
    pub fn shipment_is_customs_declarable(
        &mut self,
        declarable: bool,
        description: &str,
    ) -> &mut Self {
        self.inner
            .put("isCustomsDeclarable", declarable)
            .put("description", description);
        self
    }

    /// Incoterm of the export, e.g. `DAP` or `DDP`
    pub fn incoterm(&mut self, incoterm: &str) -> &mut Self {
        self.inner.put("incoterm", incoterm);
        self
    }

    /// Set the incoterm to [`DEFAULT_INCOTERM`]
    pub fn default_incoterm(&mut self) -> &mut Self {
        self.incoterm(DEFAULT_INCOTERM)
    }
}

impl<K: ShipmentKind> OperationBuilder for ShipmentBuilder<K> {
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

    const LINE_ITEMS: &str = "content.exportDeclaration.lineItems";

    fn line_item(description: &str, number: i64) -> Map<String, Value> {
        let Value::Object(map) = json!({
            "number": number,
            "description": description,
            "price": 150,
            "quantity": {"value": 1, "unitOfMeasurement": "BOX"},
            "manufacturerCountry": "SA",
        }) else {
            unreachable!()
        };
        map
    }

    #[test]
    fn test_line_items_numbered_in_order() {
        let mut builder = DomesticShipmentBuilder::new();
        builder
            .export_declaration_line_item(line_item("first", 9))
            .export_declaration_line_item(line_item("second", 9))
            .export_declaration_line_item(line_item("third", 0));
        let doc = builder.finalize();
        for (i, expected) in [1, 2, 3].into_iter().enumerate() {
            assert_eq!(
                doc.get(format!("{LINE_ITEMS}[{i}].number")),
                Some(&json!(expected))
            );
        }
        assert_eq!(
            doc.get_str(format!("{LINE_ITEMS}[2].description")),
            Some("third")
        );
    }

    #[test]
    fn test_line_items_numbered_through_set_field() {
        let mut builder = InternationalShipmentBuilder::new();
        builder.export_declaration_line_item(line_item("typed", 4));
        for _ in 0..2 {
            builder
                .engine_mut()
                .set_field("lineItems", Value::Object(line_item("dynamic", 9)))
                .unwrap();
        }
        let doc = builder.finalize();
        for (i, expected) in [1, 2, 3].into_iter().enumerate() {
            assert_eq!(
                doc.get(format!("{LINE_ITEMS}[{i}].number")),
                Some(&json!(expected))
            );
        }
    }

    #[test]
    fn test_invoice_keeps_line_items() {
        let mut builder = InternationalShipmentBuilder::new();
        builder
            .export_declaration_line_item(line_item("first", 1))
            .export_declaration_invoice("2024-08-20", "INV-1");
        let doc = builder.finalize();
        assert_eq!(doc.sequence_len(LINE_ITEMS), 1);
        assert_eq!(
            doc.get("content.exportDeclaration.invoice").unwrap(),
            &json!({"date": "2024-08-20", "number": "INV-1"})
        );
    }

    #[test]
    fn test_domestic_content() {
        let mut builder = DomesticShipmentBuilder::new();
        builder
            .planned_shipping_date_and_time("2024-08-20T14:00:31GMT+01:00")
            .shipment_is_customs_declarable(false)
            .package_description("Books")
            .shipment_package(&Package::new(2.5))
            .output_image_properties(&OutputImageProperties::default());
        builder.shipment_unit_of_measurement("bogus").unwrap();

        let doc = builder.finalize();
        assert_eq!(builder.operation(), Operation::DomesticShipment);
        assert_eq!(
            doc.get_str("plannedShippingDateAndTime"),
            Some("2024-08-20T14:00:31GMT+01:00")
        );
        assert_eq!(doc.get_str("content.description"), Some("Books"));
        assert_eq!(doc.get_str("content.unitOfMeasurement"), Some("metric"));
        assert_eq!(doc.get_str("outputImageProperties.encodingFormat"), Some("pdf"));
        assert_eq!(doc.sequence_len("outputImageProperties.imageOptions"), 2);
        assert!(doc.get("content.incoterm").is_none());
    }

    #[test]
    fn test_international_pickup_and_incoterm() {
        let mut builder = InternationalShipmentBuilder::new();
        builder
            .pickup_requested(true)
            .pickup_close_time("18:00")
            .pickup_postal_address(&PostalAddress::new("11564", "Riyadh", "SA"))
            .shipment_is_customs_declarable(true, "Electronics")
            .default_incoterm();

        let doc = builder.finalize();
        assert_eq!(builder.operation(), Operation::InternationalShipment);
        assert_eq!(doc.get("pickup.isRequested"), Some(&json!(true)));
        assert_eq!(doc.get_str("pickup.closeTime"), Some("18:00"));
        assert_eq!(
            doc.get_str("pickup.pickupDetails.postalAddress.cityName"),
            Some("Riyadh")
        );
        assert_eq!(doc.get_str("content.description"), Some("Electronics"));
        assert_eq!(doc.get_str("content.incoterm"), Some("DAP"));
    }
}
