//! HTTP client module
//!
//! A thin reqwest wrapper for collection reads.
//!
//! # Features
//!
//! - **Uncached GETs**: no-cache headers plus a cache-busting query parameter
//! - **Status Classification**: non-2xx responses become `Error::HttpStatus`
//! - **Single Attempt**: no retries, no backoff, no rate limiting

mod client;

pub use client::{HttpClient, RawResponse, CACHE_BUST_PARAM};
