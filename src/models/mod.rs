//! Records shared across carrier operations
//!
//! Each record knows its own wire shape; builders decide where it lands.

pub mod address;
pub mod shipment;

pub use address::{ContactInfo, PostalAddress};
pub use shipment::{Account, Dimensions, OutputImageProperties, Package};
