//! Payload document tree
//!
//! The wire payload is a JSON-shaped tree whose root is always a mapping.
//! Writes auto-create the intermediate mappings and sequences a path walks
//! through, so assembling a request never fails on shape.

use serde::Serialize;
use serde_json::{Map, Value};

use super::path::{FieldPath, PathSegment};

/// Nested key-value document sent to (or received from) a carrier endpoint.
///
/// Documents handed out by a builder are owned snapshots: they expose read
/// access only, and nothing the builder does afterwards reaches them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct PayloadDocument {
    root: Map<String, Value>,
}

impl PayloadDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Borrow the top-level mapping
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Copy the document into a standalone JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// Take ownership of the document as a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Read the value at `path`. Append segments never resolve.
    pub fn get(&self, path: impl Into<FieldPath>) -> Option<&Value> {
        let path = path.into();
        let (first, rest) = path.segments().split_first()?;
        let PathSegment::Key(key) = first else {
            return None;
        };

        let mut node = self.root.get(key)?;
        for segment in rest {
            node = match segment {
                PathSegment::Key(key) => node.as_object()?.get(key)?,
                PathSegment::Index(index) => node.as_array()?.get(*index)?,
                PathSegment::Append => return None,
            };
        }
        Some(node)
    }

    /// Read a string value at `path`
    pub fn get_str(&self, path: impl Into<FieldPath>) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Number of elements in the sequence at `path` (0 when absent)
    pub fn sequence_len(&self, path: impl Into<FieldPath>) -> usize {
        self.get(path)
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Write `value` at `path`, overwriting what was there.
    ///
    /// Writing the root replaces the whole document when `value` is a
    /// mapping. Paths that do not start with a key cannot address anything
    /// under a mapping root and are ignored.
    pub(crate) fn set(&mut self, path: &FieldPath, value: Value) {
        let Some((first, rest)) = path.segments().split_first() else {
            match value {
                Value::Object(map) => self.root = map,
                _ => tracing::debug!("Ignoring non-mapping value written to payload root"),
            }
            return;
        };
        let PathSegment::Key(key) = first else {
            tracing::debug!("Ignoring write to '{}': payload root is a mapping", path);
            return;
        };

        let mut node = self.root.entry(key.clone()).or_insert(Value::Null);
        for segment in rest {
            node = descend(node, segment);
        }
        *node = value;
    }

    /// Push `value` onto the sequence at `path`
    pub(crate) fn append(&mut self, path: &FieldPath, value: Value) {
        let path = path.clone().appending();
        self.set(&path, value);
    }

    /// Remove and return the top-level entry `key`
    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        self.root.remove(key)
    }
}

/// Step into `node` along `segment`, reshaping `node` into the container the
/// segment needs when it is anything else.
fn descend<'a>(node: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    match segment {
        PathSegment::Key(key) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let Value::Object(map) = node else {
                unreachable!("node was just made a mapping");
            };
            map.entry(key.clone()).or_insert(Value::Null)
        }
        PathSegment::Index(index) => {
            let items = sequence(node);
            while items.len() <= *index {
                items.push(Value::Object(Map::new()));
            }
            &mut items[*index]
        }
        PathSegment::Append => {
            let items = sequence(node);
            items.push(Value::Null);
            let last = items.len() - 1;
            &mut items[last]
        }
    }
}

fn sequence(node: &mut Value) -> &mut Vec<Value> {
    if !node.is_array() {
        *node = Value::Array(Vec::new());
    }
    let Value::Array(items) = node else {
        unreachable!("node was just made a sequence");
    };
    items
}

impl From<PayloadDocument> for Value {
    fn from(document: PayloadDocument) -> Self {
        document.into_value()
    }
}
