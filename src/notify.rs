//! Fetch notifications
//!
//! Every fetch reports what happened as a sequence of [`Notification`]s:
//! at most one outcome notification, always followed by exactly one
//! [`Notification::Always`]. Callers receive them through a
//! [`NotificationSink`]: a channel sender, a closure, or a
//! [`CollectingSink`].

use crate::descriptor::RequestDescriptor;
use crate::types::JsonValue;
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

/// Result of a successful page fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    /// The descriptor the fetch was issued for
    pub args: RequestDescriptor,
    /// Items of the page, decoded when the class asked for it
    pub items: Vec<JsonValue>,
    /// Total item count reported by the server
    pub items_count: u64,
    /// Whether items exist beyond this page
    pub next_page: bool,
}

/// Details of a transport failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureDetail {
    /// HTTP status code, when the server answered
    pub status: Option<u16>,
    /// Reason phrase or short failure label
    pub status_text: String,
    /// Full error description
    pub error: String,
}

impl FailureDetail {
    /// Build failure details from a crate error
    pub fn from_error(error: &crate::Error) -> Self {
        Self {
            status: error.status_code(),
            status_text: error.status_text(),
            error: error.to_string(),
        }
    }
}

impl fmt::Display for FailureDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{status} {}: {}", self.status_text, self.error),
            None => write!(f, "{}: {}", self.status_text, self.error),
        }
    }
}

/// A message raised by a fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Notification {
    /// The page was fetched and classified; raised only when a trigger is set
    Success {
        /// Caller-chosen name from the descriptor
        trigger: String,
        /// The fetched page
        envelope: ResultEnvelope,
    },

    /// The server answered but not with a usable collection page
    RequestError,

    /// The request did not complete
    RequestFailed {
        /// The descriptor the fetch was issued for
        descriptor: RequestDescriptor,
        /// What went wrong
        failure: FailureDetail,
    },

    /// Raised last, whatever the outcome
    Always {
        /// The descriptor the fetch was issued for
        descriptor: RequestDescriptor,
    },
}

impl Notification {
    /// The kind of this notification
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Success { .. } => NotificationKind::Success,
            Self::RequestError => NotificationKind::RequestError,
            Self::RequestFailed { .. } => NotificationKind::RequestFailed,
            Self::Always { .. } => NotificationKind::Always,
        }
    }

    /// Event name, as used on the wire and in logs
    pub fn name(&self) -> &str {
        match self {
            Self::Success { trigger, .. } => trigger,
            other => other.kind().as_str(),
        }
    }
}

/// Kinds of notification, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// See [`Notification::Success`]
    Success,
    /// See [`Notification::RequestError`]
    RequestError,
    /// See [`Notification::RequestFailed`]
    RequestFailed,
    /// See [`Notification::Always`]
    Always,
}

impl NotificationKind {
    /// Fixed event name for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::RequestError => "request-error",
            Self::RequestFailed => "request-failed",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of fetch notifications
pub trait NotificationSink: Send + Sync {
    /// Handle one notification
    fn notify(&self, notification: Notification);
}

impl NotificationSink for UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        let kind = notification.kind();
        if self.send(notification).is_err() {
            warn!("Dropping {kind} notification: receiver closed");
        }
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<S> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F> NotificationSink for FnSink<F>
where
    F: Fn(Notification) + Send + Sync,
{
    fn notify(&self, notification: Notification) {
        (self.0)(notification);
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

/// Records notifications in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    received: Mutex<Vec<Notification>>,
}

impl CollectingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything received so far
    pub fn take(&self) -> Vec<Notification> {
        match self.received.lock() {
            Ok(mut received) => std::mem::take(&mut *received),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Kinds received so far, in order
    pub fn kinds(&self) -> Vec<NotificationKind> {
        match self.received.lock() {
            Ok(received) => received.iter().map(Notification::kind).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(Notification::kind).collect(),
        }
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, notification: Notification) {
        match self.received.lock() {
            Ok(mut received) => received.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}
