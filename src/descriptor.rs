//! Request descriptors
//!
//! A [`RequestDescriptor`] names one page of one collection. It is echoed
//! back unchanged in every notification that carries it.

use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};

/// Describes a single collection page request
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Collection path appended to the base URL
    pub slug: String,

    /// Category tag selecting item decoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Current page number (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Name carried by the success notification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
}

impl RequestDescriptor {
    /// Create a descriptor for a collection slug
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Set the category class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set page size and page number together
    #[must_use]
    pub fn page(mut self, per_page: u32, page: u32) -> Self {
        self.per_page = Some(per_page);
        self.page = Some(page);
        self
    }

    /// Set the success notification name
    #[must_use]
    pub fn trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// The trigger name, if one is set and non-empty
    pub fn trigger_name(&self) -> Option<&str> {
        self.trigger.as_deref().filter(|t| !t.is_empty())
    }

    /// The class, if one is set and non-empty
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref().filter(|c| !c.is_empty())
    }

    /// Query parameters selecting the page on the server
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        params
    }

    /// Normalize empty optional strings to `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            class: self.class.none_if_empty(),
            trigger: self.trigger.none_if_empty(),
            ..self
        }
    }
}
