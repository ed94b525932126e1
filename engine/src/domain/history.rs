//! Usage history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::AppId;

/// A single recorded usage session.
///
/// App fields are denormalized snapshots taken at record time so history
/// survives catalog edits and deletions. The collection is append-only,
/// newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// Opaque identifier.
    pub id: String,
    /// Catalog id of the app that was used.
    pub app_id: AppId,
    /// App name at record time.
    pub app_name: String,
    /// App icon reference at record time.
    pub app_icon: String,
    /// When the session started.
    pub timestamp: DateTime<Utc>,
    /// Session length in seconds.
    pub duration_seconds: u64,
}
