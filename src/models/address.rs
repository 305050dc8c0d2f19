//! Address and contact records
//!
//! The same two shapes appear under every party of a request (shipper,
//! receiver, booking requestor, pickup location); only the root path differs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Postal address of a party
///
/// Serializes to the carrier wire form; unset optional parts are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub postal_code: String,
    pub city_name: String,
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county_name: Option<String>,
}

impl PostalAddress {
    pub fn new(
        postal_code: impl Into<String>,
        city_name: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            postal_code: postal_code.into(),
            city_name: city_name.into(),
            country_code: country_code.into(),
            ..Default::default()
        }
    }

    pub fn with_province_code(mut self, province_code: impl Into<String>) -> Self {
        self.province_code = Some(province_code.into());
        self
    }

    pub fn with_address_line1(mut self, line: impl Into<String>) -> Self {
        self.address_line1 = Some(line.into());
        self
    }

    pub fn with_address_line2(mut self, line: impl Into<String>) -> Self {
        self.address_line2 = Some(line.into());
        self
    }

    pub fn with_address_line3(mut self, line: impl Into<String>) -> Self {
        self.address_line3 = Some(line.into());
        self
    }

    pub fn with_county_name(mut self, county_name: impl Into<String>) -> Self {
        self.county_name = Some(county_name.into());
        self
    }

    /// Wire form as a JSON document
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Contact details of a party
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub company_name: String,
    pub full_name: String,
}

impl ContactInfo {
    pub fn new(
        phone: impl Into<String>,
        company_name: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            email: None,
            company_name: company_name.into(),
            full_name: full_name.into(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
