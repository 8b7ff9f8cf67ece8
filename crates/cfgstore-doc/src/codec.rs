//! YAML encoding of documents
//!
//! Output is block style with two-space indentation and keys in insertion
//! order. Decoding comes in a strict and a lenient flavour; the store uses the
//! lenient one so a damaged file reads as an empty configuration.

use crate::value::{Document, Value};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("top-level YAML node is a {0}, expected a mapping")]
    NotAMapping(&'static str),
}

/// Encode a document as block-style YAML.
pub fn to_yaml(doc: &Document) -> Result<String, CodecError> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Decode a document. Empty input and a bare `null` yield an empty mapping.
pub fn from_yaml(text: &str) -> Result<Document, CodecError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }
    let raw: serde_yaml::Value = serde_yaml::from_str(text)?;
    match Value::from(raw) {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Document::new()),
        other => Err(CodecError::NotAMapping(other.kind())),
    }
}

/// Decode a document, treating anything unreadable as an empty mapping.
pub fn from_yaml_lenient(text: &str) -> Document {
    from_yaml(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable configuration, using empty document");
        Document::new()
    })
}
