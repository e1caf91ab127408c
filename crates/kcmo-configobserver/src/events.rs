//! Operator event recording
//!
//! Events are operator-facing diagnostics. Recording one never fails and
//! never changes what an observer returns.

use std::fmt::{self, Display, Formatter};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Informational
    Normal,
    /// Something an operator should look at
    Warning,
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("Normal"),
            Self::Warning => f.write_str("Warning"),
        }
    }
}

/// A recorded event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Severity
    pub event_type: EventType,
    /// Machine-readable reason, e.g. `ObserveCloudProvidersFailed`
    pub reason: String,
    /// Human-readable message
    pub message: String,
}

/// Sink for operator events
pub trait Recorder: Send + Sync {
    /// Record an event
    fn event(&self, event_type: EventType, reason: &str, message: &str);

    /// Record a warning
    fn warning(&self, reason: &str, message: &str) {
        self.event(EventType::Warning, reason, message);
    }
}

/// Recorder that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl Recorder for TracingRecorder {
    fn event(&self, event_type: EventType, reason: &str, message: &str) {
        match event_type {
            EventType::Normal => tracing::info!(reason, "{message}"),
            EventType::Warning => tracing::warn!(reason, "{message}"),
        }
    }
}

/// Recorder that keeps events in memory
///
/// Events are also forwarded to `tracing` so nothing is lost when the
/// buffer is never inspected.
#[derive(Debug, Default)]
pub struct InMemoryRecorder {
    inner: Mutex<Vec<Event>>,
}

impl InMemoryRecorder {
    /// Create empty recorder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded so far, in order
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().clone()
    }

    /// Only warning events
    #[must_use]
    pub fn warnings(&self) -> Vec<Event> {
        self.inner
            .lock()
            .iter()
            .filter(|e| e.event_type == EventType::Warning)
            .cloned()
            .collect()
    }
}

impl Recorder for InMemoryRecorder {
    fn event(&self, event_type: EventType, reason: &str, message: &str) {
        TracingRecorder.event(event_type, reason, message);
        self.inner.lock().push(Event {
            event_type,
            reason: reason.to_string(),
            message: message.to_string(),
        });
    }
}
