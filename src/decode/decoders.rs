//! Decoder implementations

use super::types::{ItemTransform, RecordDecoder};
use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use tracing::debug;

// ============================================================================
// Collection Decoder
// ============================================================================

/// Decodes a REST collection body, which must be a JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionDecoder;

impl CollectionDecoder {
    /// Create a new collection decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for CollectionDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })?;

        match value {
            Value::Array(items) => Ok(items),
            other => Err(Error::decode(format!(
                "Expected a JSON array, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Category Decoder
// ============================================================================

/// Decodes the `name` and `slug` fields of taxonomy term items
///
/// `name` arrives in quoted-string escaped form and `slug` percent-encoded
/// (non-ASCII slugs). A field that is absent, not a string, or fails to
/// decode is left as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryDecoder;

impl CategoryDecoder {
    /// Create a new category decoder
    pub fn new() -> Self {
        Self
    }
}

impl ItemTransform for CategoryDecoder {
    fn transform(&self, item: &mut Value) {
        let Some(fields) = item.as_object_mut() else {
            return;
        };

        if let Some(Value::String(name)) = fields.get_mut("name") {
            match unescape_quoted(name) {
                Some(decoded) => *name = decoded,
                None => debug!("Leaving undecodable name as is: {name}"),
            }
        }

        if let Some(Value::String(slug)) = fields.get_mut("slug") {
            match percent_decode(slug) {
                Some(decoded) => *slug = decoded,
                None => debug!("Leaving undecodable slug as is: {slug}"),
            }
        }
    }
}

/// Decode the escape sequences of a quoted string body
///
/// Accepts the escapes of a JSON string literal (`\"`, `\\`, `\/`, `\n`,
/// `\uXXXX` and so on). Returns `None` if the text is not a valid string
/// literal body, e.g. it holds a bare `"` or a dangling backslash.
pub fn unescape_quoted(s: &str) -> Option<String> {
    if !s.contains('\\') && !s.contains('"') {
        return Some(s.to_string());
    }
    serde_json::from_str::<String>(&format!("\"{s}\"")).ok()
}

/// Percent-decode a string as UTF-8
///
/// `+` is not treated as a space. Returns `None` if the decoded bytes are
/// not valid UTF-8.
pub fn percent_decode(s: &str) -> Option<String> {
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}
