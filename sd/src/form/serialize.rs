//! Path-object serialization of form entries
//!
//! Form fields are named with dot-separated paths (e.g.
//! `project_info.basic_data.full_name`). Serialization turns the flat list
//! of `(path, value)` pairs read from a submitted form into the nested
//! questionnaire object the generation backend expects. The serializer
//! never inspects field names beyond splitting them - it has no knowledge
//! of the questionnaire's semantic schema.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// One named form input and its submitted value
///
/// The path is the field identifier verbatim. Renaming a field changes the
/// questionnaire's shape and is a breaking change to the backend contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub path: String,
    pub value: String,
}

impl FieldEntry {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Split the path into its segments
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('.').collect()
    }
}

/// Errors raised while building a questionnaire from form entries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializeError {
    #[error("field '{0}' has an empty path segment")]
    EmptySegment(String),

    #[error("field '{0}' conflicts with another field's nesting")]
    PathConflict(String),
}

/// The nested questionnaire object sent as generation context
///
/// A tree of string-keyed mappings whose leaves are strings, mirroring the
/// union of all field paths. Immutable once built for a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Questionnaire(Value);

impl Questionnaire {
    /// An empty questionnaire (used by navigation requests)
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Flatten back to `(path, value)` pairs in key order
    ///
    /// Inverse of [`serialize_entries`] for conflict-free inputs.
    pub fn flatten(&self) -> Vec<FieldEntry> {
        let mut out = Vec::new();
        flatten_value(&self.0, String::new(), &mut out);
        out
    }
}

fn flatten_value(value: &Value, prefix: String, out: &mut Vec<FieldEntry>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(child, path, out);
            }
        }
        Value::String(s) => out.push(FieldEntry::new(prefix, s.clone())),
        other => out.push(FieldEntry::new(prefix, other.to_string())),
    }
}

/// Build a questionnaire from an ordered sequence of form entries
///
/// Walks/creates nested mappings for every segment but the last, then sets
/// the leaf. Entry order is irrelevant except when two entries carry the
/// identical full path - then the later entry wins, mirroring form-data
/// iteration order. An empty value is preserved as a leaf, not omitted;
/// required-ness is enforced by the validation gate, not here. A path that
/// is a strict prefix of another path is rejected as a conflict.
pub fn serialize_entries(entries: &[FieldEntry]) -> Result<Questionnaire, SerializeError> {
    debug!(entry_count = entries.len(), "serialize_entries: called");
    let mut root = Map::new();

    for entry in entries {
        let segments = entry.segments();
        if segments.iter().any(|s| s.is_empty()) {
            debug!(path = %entry.path, "serialize_entries: empty segment");
            return Err(SerializeError::EmptySegment(entry.path.clone()));
        }
        insert(&mut root, &segments, &entry.value).map_err(|_| {
            debug!(path = %entry.path, "serialize_entries: path conflict");
            SerializeError::PathConflict(entry.path.clone())
        })?;
    }

    Ok(Questionnaire(Value::Object(root)))
}

struct Conflict;

fn insert(map: &mut Map<String, Value>, segments: &[&str], value: &str) -> Result<(), Conflict> {
    let (head, rest) = segments.split_first().expect("segments never empty");

    if rest.is_empty() {
        // A mapping already rooted here means some other field nests below
        // this path - overwriting it would silently drop that field.
        if matches!(map.get(*head), Some(Value::Object(_))) {
            return Err(Conflict);
        }
        map.insert((*head).to_string(), Value::String(value.to_string()));
        return Ok(());
    }

    let slot = map
        .entry((*head).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    match slot {
        Value::Object(inner) => insert(inner, rest, value),
        _ => Err(Conflict),
    }
}
