//! Payload documents and the paths that address into them

pub mod document;
pub mod path;

pub use document::PayloadDocument;
pub use path::{FieldPath, PathSegment};
