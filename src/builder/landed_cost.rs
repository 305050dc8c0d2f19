//! Landed cost request builder (`POST landed-cost`)
//!
//! Estimates duties, taxes and fees for a cross-border shipment. Charges and
//! items are passed through exactly as the caller supplies them.

use serde::Serialize;
use serde_json::Value;

use super::error::BuilderResult;
use super::{OperationBuilder, RequestBuilder};
use crate::models::{Account, Package, PostalAddress};
use crate::schema::{FieldSpec, Operation, Schema, UNIT_OF_MEASUREMENT_POLICY};

pub static LANDED_COST_SCHEMA: Schema = Schema {
    operation: Operation::LandedCost,
    fields: &[
        FieldSpec::free("accounts", "accounts"),
        FieldSpec::free("isCustomsDeclarable", "isCustomsDeclarable"),
        FieldSpec::free("isDTPRequested", "isDTPRequested"),
        FieldSpec::free("isInsuranceRequested", "isInsuranceRequested"),
        FieldSpec::free("productCode", "productCode"),
        FieldSpec::free("localProductCode", "localProductCode"),
        FieldSpec::with_policy(
            "unitOfMeasurement",
            "unitOfMeasurement",
            UNIT_OF_MEASUREMENT_POLICY,
        ),
        FieldSpec::free("currencyCode", "currencyCode"),
        FieldSpec::free("shipperDetails", "shipperDetails"),
        FieldSpec::free("receiverDetails", "receiverDetails"),
        FieldSpec::free("getCostBreakdown", "getCostBreakdown"),
        FieldSpec::free("charges", "charges"),
        FieldSpec::free("shipmentPurpose", "shipmentPurpose"),
        FieldSpec::free("transportationMode", "transportationMode"),
        FieldSpec::free("merchantSelectedCarrierName", "merchantSelectedCarrierName"),
        FieldSpec::free("packages", "packages"),
        FieldSpec::free("items", "items"),
        FieldSpec::free("getTariffFormula", "getTariffFormula"),
        FieldSpec::free("getQuotationID", "getQuotationID"),
    ],
};

/// Builder for landed cost estimates
#[derive(Debug, Clone)]
pub struct LandedCostRequestBuilder {
    inner: RequestBuilder,
}

impl Default for LandedCostRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LandedCostRequestBuilder {
    pub fn new() -> Self {
        Self {
            inner: RequestBuilder::new(&LANDED_COST_SCHEMA),
        }
    }

    pub fn accounts(&mut self, account: &Account) -> &mut Self {
        self.inner.put("accounts", account.to_accounts_payload());
        self
    }

    /// Customs, duty-paid and insurance flags
    pub fn customs_and_insurance_details(
        &mut self,
        customs_declarable: bool,
        dtp_requested: bool,
        insurance_requested: bool,
    ) -> &mut Self {
        self.inner
            .put("isCustomsDeclarable", customs_declarable)
            .put("isDTPRequested", dtp_requested)
            .put("isInsuranceRequested", insurance_requested);
        self
    }

    pub fn product_code(&mut self, product_code: &str) -> &mut Self {
        self.inner.put("productCode", product_code);
        self
    }

    pub fn local_product_code(&mut self, local_product_code: &str) -> &mut Self {
        self.inner.put("localProductCode", local_product_code);
        self
    }

    /// `metric` or `imperial`; anything else becomes `metric`
    pub fn unit_of_measurement(&mut self, unit: &str) -> BuilderResult<&mut Self> {
        self.inner.set_field("unitOfMeasurement", unit)?;
        Ok(self)
    }

    pub fn currency_code(&mut self, currency_code: &str) -> &mut Self {
        self.inner.put("currencyCode", currency_code);
        self
    }

    /// Origin; only postal code, city and country are sent
    pub fn shipper_details(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("shipperDetails", location(address));
        self
    }

    /// Destination; only postal code, city and country are sent
    pub fn receiver_details(&mut self, address: &PostalAddress) -> &mut Self {
        self.inner.put("receiverDetails", location(address));
        self
    }

    pub fn get_cost_breakdown(&mut self, requested: bool) -> &mut Self {
        self.inner.put("getCostBreakdown", requested);
        self
    }

    /// Additional charges (freight, insurance, ...) as carrier documents
    pub fn charges(&mut self, charges: Vec<Value>) -> &mut Self {
        self.inner.put("charges", Value::Array(charges));
        self
    }

    /// e.g. `commercial` or `personal`
    pub fn shipment_purpose(&mut self, purpose: &str) -> &mut Self {
        self.inner.put("shipmentPurpose", purpose);
        self
    }

    /// e.g. `air`, `ocean`, `ground`
    pub fn transportation_mode(&mut self, mode: &str) -> &mut Self {
        self.inner.put("transportationMode", mode);
        self
    }

    pub fn merchant_selected_carrier_name(&mut self, carrier: &str) -> &mut Self {
        self.inner.put("merchantSelectedCarrierName", carrier);
        self
    }

    /// The shipped package. Replaces any earlier package.
    pub fn package_details(&mut self, package: &Package) -> &mut Self {
        self.inner
            .put("packages", Value::Array(vec![package.to_payload()]));
        self
    }

    /// Goods in the shipment, sent verbatim
    pub fn items(&mut self, items: Vec<Value>) -> &mut Self {
        self.inner.put("items", Value::Array(items));
        self
    }

    pub fn get_tariff_formula(&mut self, requested: bool) -> &mut Self {
        self.inner.put("getTariffFormula", requested);
        self
    }

    pub fn get_quotation_id(&mut self, requested: bool) -> &mut Self {
        self.inner.put("getQuotationID", requested);
        self
    }
}

/// The part of an address landed cost estimates look at
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location<'a> {
    postal_code: &'a str,
    city_name: &'a str,
    country_code: &'a str,
}

fn location(address: &PostalAddress) -> Value {
    serde_json::to_value(Location {
        postal_code: &address.postal_code,
        city_name: &address.city_name,
        country_code: &address.country_code,
    })
    .unwrap_or_default()
}

impl OperationBuilder for LandedCostRequestBuilder {
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
    fn test_items_sent_verbatim() {
        let items = vec![json!({
            "number": 1,
            "name": "KNITWEAR COTTON",
            "commodityCode": "6110129090",
            "quantity": 2,
            "unitPrice": 120,
            "unitPriceCurrencyCode": "EUR",
            "customsValue": 240,
            "weight": 5,
            "weightUnitOfMeasurement": "metric"
        })];
        let mut builder = LandedCostRequestBuilder::new();
        builder.items(items.clone());
        assert_eq!(builder.finalize().get("items"), Some(&Value::Array(items)));
    }

    #[test]
    fn test_flags_and_locations() {
        let mut builder = LandedCostRequestBuilder::new();
        builder
            .customs_and_insurance_details(true, false, false)
            .shipper_details(&PostalAddress::new("14800", "Prague", "CZ").with_province_code("PR"))
            .receiver_details(&PostalAddress::new("10001", "New York", "US"))
            .get_quotation_id(true);
        builder.unit_of_measurement("imperial").unwrap();

        let doc = builder.finalize();
        assert_eq!(doc.get("isCustomsDeclarable"), Some(&json!(true)));
        assert_eq!(doc.get("isDTPRequested"), Some(&json!(false)));
        assert_eq!(
            doc.get("shipperDetails").unwrap(),
            &json!({"postalCode": "14800", "cityName": "Prague", "countryCode": "CZ"})
        );
        assert_eq!(doc.get_str("receiverDetails.cityName"), Some("New York"));
        assert_eq!(doc.get("getQuotationID"), Some(&json!(true)));
        assert_eq!(doc.get_str("unitOfMeasurement"), Some("imperial"));
    }
}
