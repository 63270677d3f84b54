//! Paged resource fetcher
//!
//! Reads one page of a REST collection, works out whether another page
//! follows, and reports the result to a [`NotificationSink`].
//!
//! ```rust,ignore
//! use wprest_fetch::{FetcherConfig, PagedFetcher, RequestDescriptor};
//!
//! let config = FetcherConfig::new("https://example.com/wp-json/wp/v2/");
//! let fetcher = PagedFetcher::new(config)?;
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//!
//! let descriptor = RequestDescriptor::new("categories")
//!     .class("astra-portfolio-categories")
//!     .page(10, 1)
//!     .trigger("categories-loaded");
//! fetcher.fetch(descriptor, &tx).await;
//!
//! while let Ok(notification) = rx.try_recv() {
//!     println!("{}", notification.name());
//! }
//! ```

use crate::config::FetcherConfig;
use crate::decode::{
    CategoryDecoder, CollectionDecoder, ItemTransform, NoTransform, RecordDecoder,
};
use crate::descriptor::RequestDescriptor;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RawResponse};
use crate::notify::{FailureDetail, Notification, NotificationSink, ResultEnvelope};
use crate::pagination::{self, TOTAL_HEADER};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Classified result of one fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// A page was read and classified
    Page(ResultEnvelope),
    /// The server answered, but not with a usable collection page
    SoftError(Error),
    /// The request did not complete
    Failed(Error),
}

impl FetchOutcome {
    /// The envelope, if the fetch produced a page
    pub fn envelope(&self) -> Option<&ResultEnvelope> {
        match self {
            Self::Page(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Whether the fetch produced a page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

/// Fetches pages of REST collections
///
/// Cloning is cheap; clones share the underlying connection pool and
/// nothing else.
#[derive(Debug, Clone)]
pub struct PagedFetcher {
    client: HttpClient,
    config: Arc<FetcherConfig>,
}

impl PagedFetcher {
    /// Create a fetcher for the given config
    pub fn new(config: FetcherConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(&config)?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// The config this fetcher was built with
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch one page and report it to `sink`
    ///
    /// Raises at most one outcome notification (`Success` only when the
    /// descriptor has a non-empty trigger), then always `Always`.
    pub async fn fetch<S>(&self, descriptor: RequestDescriptor, sink: &S)
    where
        S: NotificationSink + ?Sized,
    {
        let outcome = self.fetch_page(&descriptor).await;

        match outcome {
            FetchOutcome::Page(envelope) => match descriptor.trigger_name() {
                Some(trigger) => sink.notify(Notification::Success {
                    trigger: trigger.to_string(),
                    envelope,
                }),
                None => debug!("Fetched '{}' with no trigger set", descriptor.slug),
            },
            FetchOutcome::SoftError(err) => {
                warn!("Unusable response for '{}': {err}", descriptor.slug);
                sink.notify(Notification::RequestError);
            }
            FetchOutcome::Failed(err) => {
                warn!("Request for '{}' failed: {err}", descriptor.slug);
                sink.notify(Notification::RequestFailed {
                    descriptor: descriptor.clone(),
                    failure: FailureDetail::from_error(&err),
                });
            }
        }

        sink.notify(Notification::Always { descriptor });
    }

    /// Start a fetch on the runtime without waiting for it
    pub fn spawn<S>(&self, descriptor: RequestDescriptor, sink: S) -> JoinHandle<()>
    where
        S: NotificationSink + 'static,
    {
        let fetcher = self.clone();
        tokio::spawn(async move { fetcher.fetch(descriptor, &sink).await })
    }

    /// Fetch one page and return the classified outcome
    pub async fn fetch_page(&self, descriptor: &RequestDescriptor) -> FetchOutcome {
        if descriptor.slug.trim().is_empty() {
            return FetchOutcome::Failed(Error::missing_field("slug"));
        }

        let url = self.config.join_url(&descriptor.slug);
        let response = match self
            .client
            .get_uncached(&url, &descriptor.query_params())
            .await
        {
            Ok(response) => response,
            Err(err) => return FetchOutcome::Failed(err),
        };

        match self.classify(descriptor, &response) {
            Ok(envelope) => FetchOutcome::Page(envelope),
            Err(err) => FetchOutcome::SoftError(err),
        }
    }

    /// Turn a successful response into an envelope
    fn classify(
        &self,
        descriptor: &RequestDescriptor,
        response: &RawResponse,
    ) -> Result<ResultEnvelope> {
        let mut items = CollectionDecoder::new().decode(&response.body)?;
        let total = pagination::total_count(&response.headers)
            .ok_or_else(|| Error::missing_total(TOTAL_HEADER))?;

        if let Some(pages) = pagination::total_pages(&response.headers) {
            debug!("'{}': {total} items over {pages} pages", descriptor.slug);
        }

        self.item_transform(descriptor).transform_all(&mut items);

        Ok(ResultEnvelope {
            args: descriptor.clone(),
            items,
            items_count: total,
            next_page: pagination::next_page(descriptor, total),
        })
    }

    /// Category decoding for recognized classes, pass-through otherwise
    fn item_transform(&self, descriptor: &RequestDescriptor) -> &'static dyn ItemTransform {
        match descriptor.class_name() {
            Some(class) if self.config.is_category_class(class) => &CategoryDecoder,
            _ => &NoTransform,
        }
    }
}
