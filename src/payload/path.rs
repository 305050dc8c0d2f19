//! Field paths into a payload document
//!
//! A path is written the way carrier API documentation refers to fields:
//! dotted keys, `[n]` for a fixed sequence index and `[]` to append a new
//! element, e.g. `content.exportDeclaration.lineItems[]` or
//! `shipmentDetails[0].accounts`.

use std::fmt;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key
    Key(String),
    /// Fixed position in a sequence
    Index(usize),
    /// New element at the end of a sequence
    Append,
}

/// Location of a value inside a payload document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parse a path from its textual form.
    ///
    /// Parsing never fails: empty parts are skipped and a bracket group that
    /// is neither `[]` nor `[<digits>]` is kept as a literal key.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();

        for part in text.split('.').filter(|p| !p.is_empty()) {
            match parse_part(part) {
                Some(parsed) => segments.extend(parsed),
                None => segments.push(PathSegment::Key(part.to_string())),
            }
        }

        Self { segments }
    }

    /// Build a path from already split segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the document root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the last segment appends to a sequence
    pub fn is_append(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Append))
    }

    /// Extend the path with a mapping key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Extend the path with a sequence index
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// The same path with a trailing append segment (idempotent)
    pub fn appending(mut self) -> Self {
        if !self.is_append() {
            self.segments.push(PathSegment::Append);
        }
        self
    }

    /// The same path without a trailing append segment
    pub fn without_append(mut self) -> Self {
        if self.is_append() {
            self.segments.pop();
        }
        self
    }
}

/// Split `name[0][]` into its segments. `None` means the part is malformed.
fn parse_part(part: &str) -> Option<Vec<PathSegment>> {
    let Some(open) = part.find('[') else {
        return Some(vec![PathSegment::Key(part.to_string())]);
    };

    let mut segments = Vec::new();
    if open > 0 {
        segments.push(PathSegment::Key(part[..open].to_string()));
    }

    let mut rest = &part[open..];
    while !rest.is_empty() {
        let inner_end = rest.strip_prefix('[')?.find(']')?;
        let inner = &rest[1..=inner_end];
        if inner.is_empty() {
            segments.push(PathSegment::Append);
        } else if inner.chars().all(|c| c.is_ascii_digit()) {
            segments.push(PathSegment::Index(inner.parse().ok()?));
        } else {
            return None;
        }
        rest = &rest[inner_end + 2..];
    }

    Some(segments)
}

impl From<&str> for FieldPath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<String> for FieldPath {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(path: &FieldPath) -> Self {
        path.clone()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => {
                    if !first {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
                PathSegment::Append => f.write_str("[]")?,
            }
            first = false;
        }
        Ok(())
    }
}
