//! Page window and total-count header parsing

use crate::descriptor::RequestDescriptor;
use reqwest::header::HeaderMap;

/// Header carrying the total number of items in the collection
pub const TOTAL_HEADER: &str = "x-wp-total";

/// Header carrying the total number of pages for the requested page size
pub const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Read the total item count from response headers
pub fn total_count(headers: &HeaderMap) -> Option<u64> {
    parse_header(headers, TOTAL_HEADER)
}

/// Read the total page count from response headers
pub fn total_pages(headers: &HeaderMap) -> Option<u64> {
    parse_header(headers, TOTAL_PAGES_HEADER)
}

fn parse_header(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// The slice of a collection one request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Items per page
    pub per_page: u32,
    /// Page number (1-based)
    pub page: u32,
}

impl PageWindow {
    /// Create a page window
    pub fn new(per_page: u32, page: u32) -> Self {
        Self { per_page, page }
    }

    /// Window for a descriptor, present only when both page fields are set
    pub fn from_descriptor(descriptor: &RequestDescriptor) -> Option<Self> {
        match (descriptor.per_page, descriptor.page) {
            (Some(per_page), Some(page)) => Some(Self::new(per_page, page)),
            _ => None,
        }
    }

    /// Number of items up to and including this page
    pub fn end(&self) -> u64 {
        u64::from(self.per_page).saturating_mul(u64::from(self.page))
    }

    /// Whether items exist beyond this page
    pub fn has_more(&self, total: u64) -> bool {
        self.end() < total
    }

    /// Like [`has_more`](Self::has_more), with an unknown total treated as 0
    pub fn has_more_from(&self, total: Option<u64>) -> bool {
        self.has_more(total.unwrap_or(0))
    }
}

/// Next-page flag for a descriptor; always false without a full page window
pub fn next_page(descriptor: &RequestDescriptor, total: u64) -> bool {
    PageWindow::from_descriptor(descriptor).is_some_and(|w| w.has_more(total))
}
