//! Shipment tracking request builder (`GET tracking`)

use super::{OperationBuilder, RequestBuilder};
use crate::schema::{FieldSpec, Operation, Schema};

/// Payload field the transport lifts into the `Accept-Language` header
pub const ACCEPT_LANGUAGE_FIELD: &str = "Accept-Language";

pub static TRACKING_SCHEMA: Schema = Schema {
    operation: Operation::Tracking,
    fields: &[
        FieldSpec::free("shipmentTrackingNumber", "shipmentTrackingNumber"),
        FieldSpec::free(ACCEPT_LANGUAGE_FIELD, ACCEPT_LANGUAGE_FIELD),
    ],
};

/// Builder for tracking queries
#[derive(Debug, Clone)]
pub struct TrackingRequestBuilder {
    inner: RequestBuilder,
}

impl Default for TrackingRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingRequestBuilder {
    pub fn new() -> Self {
        Self {
            inner: RequestBuilder::new(&TRACKING_SCHEMA),
        }
    }

    pub fn tracking_number(&mut self, tracking_number: &str) -> &mut Self {
        self.inner.put("shipmentTrackingNumber", tracking_number);
        self
    }

    /// Language of the tracking event descriptions (three-letter code, e.g. `eng`)
    pub fn language(&mut self, language: &str) -> &mut Self {
        self.inner.put(ACCEPT_LANGUAGE_FIELD, language);
        self
    }
}

impl OperationBuilder for TrackingRequestBuilder {
    fn engine(&self) -> &RequestBuilder {
        &self.inner
    }

    fn engine_mut(&mut self) -> &mut RequestBuilder {
        &mut self.inner
    }
}
