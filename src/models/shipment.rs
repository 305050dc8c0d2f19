//! Package, account and document-output records

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A physical package with weight and dimensions
///
/// Measurements must be finite: JSON has no NaN or infinity, so a
/// non-finite weight or dimension is sent as `null` (and logged).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub weight: f64,
    #[serde(default)]
    pub dimensions: Dimensions,
}

/// Package dimensions. Each defaults to 1, which is what the rating
/// endpoint expects when real dimensions are unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default = "default_dimension")]
    pub length: f64,
    #[serde(default = "default_dimension")]
    pub width: f64,
    #[serde(default = "default_dimension")]
    pub height: f64,
}

fn default_dimension() -> f64 {
    1.0
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            length: default_dimension(),
            width: default_dimension(),
            height: default_dimension(),
        }
    }
}

impl Dimensions {
    pub fn is_finite(&self) -> bool {
        self.length.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

impl Package {
    /// Package of the given weight with default dimensions
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            dimensions: Dimensions::default(),
        }
    }

    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.dimensions = Dimensions {
            length,
            width,
            height,
        };
        self
    }

    /// Whether every measurement can be represented in JSON
    pub fn is_finite(&self) -> bool {
        self.weight.is_finite() && self.dimensions.is_finite()
    }

    pub fn to_payload(&self) -> Value {
        if !self.is_finite() {
            tracing::warn!("Package has non-finite measurements, sending them as null: {:?}", self);
        }
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Carrier account a request is billed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default = "default_account_type")]
    pub type_code: String,
    #[serde(default)]
    pub number: String,
}

fn default_account_type() -> String {
    "shipper".to_string()
}

impl Default for Account {
    fn default() -> Self {
        Self::shipper("")
    }
}

impl Account {
    pub fn new(type_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            type_code: type_code.into(),
            number: number.into(),
        }
    }

    /// Shipper account with the given number
    pub fn shipper(number: impl Into<String>) -> Self {
        Self::new(default_account_type(), number)
    }

    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// The single-element `accounts` array carrier requests expect
    pub fn to_accounts_payload(&self) -> Value {
        Value::Array(vec![self.to_payload()])
    }
}

/// Label and document output settings for shipment creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputImageProperties {
    /// pdf, zpl, lp2 or epl. Invoices and receipts are always PDF.
    pub encoding_format: String,
    /// Hide the account number on the waybill document
    pub hide_account_number: bool,
    /// Request the invoice and waybill documents
    pub is_requested: bool,
}

impl Default for OutputImageProperties {
    fn default() -> Self {
        Self {
            encoding_format: "pdf".to_string(),
            hide_account_number: false,
            is_requested: true,
        }
    }
}

impl OutputImageProperties {
    pub fn new(encoding_format: impl Into<String>) -> Self {
        Self {
            encoding_format: encoding_format.into(),
            ..Default::default()
        }
    }

    pub fn with_hidden_account_number(mut self, hide: bool) -> Self {
        self.hide_account_number = hide;
        self
    }

    pub fn with_requested(mut self, is_requested: bool) -> Self {
        self.is_requested = is_requested;
        self
    }

    /// The `imageOptions` array: a commercial invoice and a waybill document
    pub fn image_options_payload(&self) -> Value {
        json!([
            {
                "invoiceType": "commercial",
                "isRequested": self.is_requested,
                "typeCode": "invoice",
            },
            {
                "hideAccountNumber": self.hide_account_number,
                "isRequested": self.is_requested,
                "typeCode": "waybillDoc",
            }
        ])
    }
}
