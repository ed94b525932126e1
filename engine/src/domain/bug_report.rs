//! Bug report workflow model.
//!
//! A report moves `pending → approved` or `pending → rejected` and never
//! leaves a terminal state. The status field doubles as the "already
//! rewarded" guard: there is deliberately no separate rewarded flag, so the
//! single guarded transition below is the only idempotence check the reward
//! grant needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Lifecycle state of a bug report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugStatus {
    /// Awaiting review.
    Pending,
    /// Accepted; the frozen reward has been granted. Terminal.
    Approved,
    /// Declined; no reward. Terminal.
    Rejected,
}

impl BugStatus {
    /// Whether the status permits no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Reviewer decision applied to a pending report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugDecision {
    /// Accept the report and grant the frozen reward.
    Approved,
    /// Decline the report.
    Rejected,
}

/// A user-submitted bug report.
///
/// ## Invariants
/// - `reward_points` is frozen at submission and never recomputed.
/// - `status` leaves `pending` at most once, via [`BugReport::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugReport {
    /// Opaque identifier.
    pub id: String,
    /// Reporting account.
    pub user_id: UserId,
    /// Reporter display name, denormalized at submission time.
    pub user_name: String,
    /// Free-text description.
    pub description: String,
    status: BugStatus,
    /// When the report was submitted.
    pub date: DateTime<Utc>,
    /// Reward frozen at submission time.
    pub reward_points: i64,
}

impl BugReport {
    /// Create a new pending report.
    pub fn new(
        id: impl Into<String>,
        user_id: UserId,
        user_name: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
        reward_points: i64,
    ) -> Self {
        Self {
            id: id.into(),
            user_id,
            user_name: user_name.into(),
            description: description.into(),
            status: BugStatus::Pending,
            date,
            reward_points,
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> BugStatus {
        self.status
    }

    /// Whether the report has already been resolved.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a reviewer decision.
    ///
    /// Returns `false` without changing anything when the report is already
    /// terminal. This is the sole transition path out of `pending`, so the
    /// caller may grant the reward exactly when this returns `true` for an
    /// approval.
    pub fn resolve(&mut self, decision: BugDecision) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = match decision {
            BugDecision::Approved => BugStatus::Approved,
            BugDecision::Rejected => BugStatus::Rejected,
        };
        true
    }

    /// Short reason label for the reward ledger entry, derived from the
    /// description.
    pub fn reward_reason(&self) -> String {
        const MAX_SUMMARY: usize = 40;
        let summary: String = self.description.chars().take(MAX_SUMMARY).collect();
        if self.description.chars().count() > MAX_SUMMARY {
            format!("Bug reward: {summary}…")
        } else {
            format!("Bug reward: {summary}")
        }
    }
}
