//! Response decoder module
//!
//! # Overview
//!
//! Turns a collection response body into items, and rewrites the encoded
//! fields of category items so callers see display-ready values.

mod decoders;
mod types;

pub use decoders::{percent_decode, unescape_quoted, CategoryDecoder, CollectionDecoder};
pub use types::{ItemTransform, NoTransform, RecordDecoder};
