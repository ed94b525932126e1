//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed entities owned by the engine and the
//! ports it drives. Types here are plain data plus local invariants; the
//! cross-collection invariants (projection/roster sync, ledger append
//! discipline) are enforced by [`crate::engine`].

pub mod bug_report;
pub mod catalog;
pub mod error;
pub mod history;
pub mod ledger;
pub mod notification;
pub mod ports;
pub mod support;
pub mod user;

pub use self::bug_report::{BugDecision, BugReport, BugStatus};
pub use self::catalog::{AppId, AppIdValidationError, AppRecord, Category};
pub use self::error::{Error, ErrorCode};
pub use self::history::HistoryItem;
pub use self::ledger::{PointTransaction, TransactionKind};
pub use self::notification::{Notification, NotificationKind};
pub use self::support::{SupportTicket, TicketStatus};
pub use self::user::{
    EmailAddress, SubscriptionStatus, ThemePreference, User, UserId, UserPatch,
    UserValidationError,
};

/// Convenient engine result alias.
pub type EngineResult<T> = Result<T, Error>;
