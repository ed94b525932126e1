//! Point ledger entries.
//!
//! The ledger is an append-only, newest-first sequence. Every
//! balance-changing operation in the engine appends exactly one matching
//! entry in the same logical transaction; administrative grants outside the
//! engine may move a balance without one, so the running sum is not required
//! to equal the live balance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Points credited to the user.
    Earned,
    /// Points spent by the user.
    Redeemed,
}

/// A single point-earning or point-redemption record.
///
/// ## Invariants
/// - `amount` is always stored positive; the direction lives in `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointTransaction {
    /// Opaque identifier.
    pub id: String,
    /// Account the entry is attributed to.
    pub user_id: UserId,
    /// When the entry was appended.
    pub date: DateTime<Utc>,
    /// Positive point amount.
    pub amount: i64,
    /// Human-readable reason label.
    pub reason: String,
    /// Direction of the entry.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}
