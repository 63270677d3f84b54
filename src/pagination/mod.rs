//! Pagination module
//!
//! WordPress collection endpoints report the full collection size in the
//! `X-WP-Total` response header. This module reads that header and decides
//! whether a page window has more items after it.

mod window;

pub use window::{
    next_page, total_count, total_pages, PageWindow, TOTAL_HEADER, TOTAL_PAGES_HEADER,
};
