#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # wprest-fetch
//!
//! Reads pages of WordPress REST API collections and reports each outcome
//! as a typed notification.
//!
//! ## Features
//!
//! - **Page Boundaries**: `next_page` from the `X-WP-Total` header
//! - **Category Decoding**: unescaped `name` and percent-decoded `slug` for
//!   taxonomy term items
//! - **Typed Notifications**: success, request error, request failed and
//!   always, delivered to a channel, closure or collector
//! - **Uncached Reads**: every request bypasses HTTP caches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wprest_fetch::{CollectingSink, FetcherConfig, PagedFetcher, RequestDescriptor};
//!
//! #[tokio::main]
//! async fn main() -> wprest_fetch::Result<()> {
//!     let fetcher = PagedFetcher::new(FetcherConfig::new("https://example.com/wp-json/wp/v2"))?;
//!     let sink = CollectingSink::new();
//!
//!     let descriptor = RequestDescriptor::new("categories")
//!         .class("astra-portfolio-categories")
//!         .page(10, 1)
//!         .trigger("categories-loaded");
//!     fetcher.fetch(descriptor, &sink).await;
//!
//!     for notification in sink.take() {
//!         println!("{}", notification.name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RequestDescriptor ──► PagedFetcher::fetch
//!                          │
//!        ┌─────────────────┼──────────────────┐
//!        │                 │                  │
//!   http (GET,        decode (array,     pagination
//!   no-cache)         category fields)   (X-WP-Total)
//!        └─────────────────┼──────────────────┘
//!                          ▼
//!            NotificationSink ◄── Success | RequestError
//!                                 | RequestFailed, then Always
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Fetcher configuration
pub mod config;

/// Request descriptors
pub mod descriptor;

/// HTTP client
pub mod http;

/// Collection and category item decoding
pub mod decode;

/// Total-count header and page boundaries
pub mod pagination;

/// Notifications and sinks
pub mod notify;

/// The paged resource fetcher
pub mod fetcher;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FetcherConfig;
pub use descriptor::RequestDescriptor;
pub use error::{Error, Result};
pub use fetcher::{FetchOutcome, PagedFetcher};
pub use notify::{
    CollectingSink, FailureDetail, FnSink, Notification, NotificationKind, NotificationSink,
    ResultEnvelope,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
