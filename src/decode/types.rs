//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use serde_json::Value;

/// Trait for decoding response bodies into items
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into an ordered list of items
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}

/// Trait for rewriting decoded items in place
pub trait ItemTransform: Send + Sync {
    /// Rewrite one item
    fn transform(&self, item: &mut Value);

    /// Rewrite every item, keeping their order
    fn transform_all(&self, items: &mut [Value]) {
        for item in items.iter_mut() {
            self.transform(item);
        }
    }
}

/// Leaves items untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTransform;

impl ItemTransform for NoTransform {
    fn transform(&self, _item: &mut Value) {}
}
