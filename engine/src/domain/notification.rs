//! In-app notifications.
//!
//! Produced by engine workflows (bug report resolution and the premium
//! upgrade) and read back by the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral information.
    Info,
    /// A positive outcome.
    Success,
    /// Something needing attention.
    Warning,
    /// A failure.
    Error,
}

/// A single notification entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Opaque identifier.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the notification was produced.
    pub date: DateTime<Utc>,
    /// Whether the user has seen it.
    pub read: bool,
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}
