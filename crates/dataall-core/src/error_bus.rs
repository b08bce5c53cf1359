// ── Central error channel ──
//
// One process-wide sink for failures the caller had no chance to branch
// on. Publishers push `SetError`; the presenting layer (CLI stderr, a
// UI banner) renders the current error and clears it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::warn;

const ERROR_CHANNEL_SIZE: usize = 64;

/// Message surfaced for every transport-level failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// Failure class of an [`ErrorEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request never completed (connect, DNS, timeout).
    Network,
    /// A response arrived but carried no usable GraphQL envelope.
    Unhandled,
    /// GraphQL errors a list view forwarded after failing to render.
    Request,
    /// A maintenance admin action was refused.
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEvent {
    pub kind: ErrorKind,
    /// User-facing text.
    pub message: String,
    /// Underlying cause, for logs and `--verbose` output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub at: DateTime<Utc>,
}

impl ErrorEvent {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
            at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// What subscribers observe on the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorAction {
    SetError(ErrorEvent),
    ClearError,
}

/// Cheaply cloneable handle to the error channel.
///
/// Publishing never blocks and never fails: with no subscribers the
/// event is still recorded as the current error.
#[derive(Debug, Clone)]
pub struct ErrorBus {
    inner: Arc<BusInner>,
}

#[derive(Debug)]
struct BusInner {
    actions: broadcast::Sender<ErrorAction>,
    current: watch::Sender<Option<ErrorEvent>>,
}

impl Default for ErrorBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorBus {
    pub fn new() -> Self {
        let (actions, _) = broadcast::channel(ERROR_CHANNEL_SIZE);
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(BusInner { actions, current }),
        }
    }

    pub fn publish(&self, event: ErrorEvent) {
        warn!(
            kind = %event.kind,
            message = %event.message,
            detail = event.detail.as_deref().unwrap_or(""),
            "error surfaced"
        );
        self.inner.current.send_replace(Some(event.clone()));
        let _ = self.inner.actions.send(ErrorAction::SetError(event));
    }

    /// Shorthand for publishing an event without detail.
    pub fn report(&self, kind: ErrorKind, message: impl Into<String>) {
        self.publish(ErrorEvent::new(kind, message));
    }

    pub fn clear(&self) {
        let had_error = self.inner.current.send_replace(None).is_some();
        if had_error {
            let _ = self.inner.actions.send(ErrorAction::ClearError);
        }
    }

    /// The most recent unclear error, if any.
    pub fn current(&self) -> Option<ErrorEvent> {
        self.inner.current.borrow().clone()
    }

    /// Every action published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ErrorAction> {
        self.inner.actions.subscribe()
    }

    /// Latest-value view, for renderers that only care about the banner.
    pub fn watch(&self) -> watch::Receiver<Option<ErrorEvent>> {
        self.inner.current.subscribe()
    }
}
