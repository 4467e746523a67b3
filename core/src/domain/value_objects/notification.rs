//! Result of a best-effort notification step.

use serde::{Deserialize, Serialize};

/// Outcome of dispatching a verification email
///
/// Dispatch never fails the operation that triggered it; the outcome is
/// reported next to the operation's own result instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationOutcome {
    Sent { message_id: String },
    Failed { reason: String },
    /// No email provider is configured
    Disabled,
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }
}

/// A value produced by an operation together with its notification outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued<T> {
    pub value: T,
    pub notification: NotificationOutcome,
}

impl<T> Issued<T> {
    pub fn new(value: T, notification: NotificationOutcome) -> Self {
        Self {
            value,
            notification,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Issued<U> {
        Issued {
            value: f(self.value),
            notification: self.notification,
        }
    }
}
