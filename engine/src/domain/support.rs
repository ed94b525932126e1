//! Support tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Lifecycle state of a support ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting a response.
    Open,
    /// Answered and closed by an administrator.
    Closed,
}

/// A user-filed support request. Always created [`TicketStatus::Open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    /// Opaque identifier.
    pub id: String,
    /// Filing account.
    pub user_id: UserId,
    /// Short subject line.
    pub subject: String,
    /// Free-text message body.
    pub message: String,
    /// When the ticket was filed.
    pub date: DateTime<Utc>,
    /// Lifecycle state.
    pub status: TicketStatus,
    /// Administrator reply, present once closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_reply: Option<String>,
}
