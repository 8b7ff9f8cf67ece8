//! Dot-path access into a [`Document`]
//!
//! Paths are split on `.` with no escaping, so a key that itself contains a
//! dot (`kafka."bootstrap.servers"`) is reachable by reading its parent
//! mapping, not by a single path.

use std::fmt;

use crate::value::{Document, Value};

/// A parsed dot-separated path. Always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Split on `.`. Interior empty segments are kept (`"a..b"` has three),
    /// trailing ones are dropped (`"a.b."` is `a.b`). A path made only of
    /// dots, or the empty string, is the single empty key.
    pub fn parse(path: &str) -> Self {
        let mut segments: Vec<String> = path.split('.').map(str::to_string).collect();
        while segments.len() > 1 && segments.last().is_some_and(String::is_empty) {
            segments.pop();
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Resolve `path` against `doc`.
///
/// Returns `None` when a key is missing or when a non-mapping value is hit
/// before the last segment.
pub fn get<'a>(doc: &'a Document, path: &KeyPath) -> Option<&'a Value> {
    let (first, rest) = path.segments.split_first()?;
    let mut current = doc.get(first)?;
    for segment in rest {
        current = match current {
            Value::Mapping(map) => map.get(segment)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Assign `value` at `path`, creating empty mappings for missing segments.
///
/// The final key is overwritten regardless of what it held. An intermediate
/// that exists but is not a mapping is replaced by an empty one. Nothing is
/// persisted here; callers write the returned document.
pub fn set(doc: Document, path: &KeyPath, value: Value) -> Document {
    assign(doc, &path.segments, value)
}

fn assign(mut map: Document, segments: &[String], value: Value) -> Document {
    match segments {
        [] => map,
        [last] => {
            map.insert(last.clone(), value);
            map
        }
        [head, rest @ ..] => {
            let slot = map.entry(head.clone()).or_insert_with(Value::empty_mapping);
            let child = match std::mem::take(slot) {
                Value::Mapping(child) => child,
                other => {
                    tracing::debug!(key = %head, kind = other.kind(), "replacing non-mapping intermediate");
                    Document::new()
                }
            };
            *slot = Value::Mapping(assign(child, rest, value));
            map
        }
    }
}
