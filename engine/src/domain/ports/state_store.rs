//! Port for the durable slot-per-collection store.
//!
//! The substrate is a localStorage-equivalent key-value store: one slot per
//! entity collection, JSON payloads, load-on-start and write-on-mutate. The
//! port is synchronous because slot writes are small, local, and cheap; the
//! engine treats every failure as degradation, never as an operation error.

use thiserror::Error;

/// The durable slots owned by the engine.
///
/// Slot keys keep the legacy storage names so an existing data directory
/// remains readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSlot {
    /// The nullable session-user projection.
    CurrentUser,
    /// The canonical roster of all accounts.
    Roster,
    /// Usage history, newest first.
    History,
    /// Saved-for-later app ids for the session user.
    Wishlist,
    /// Bug reports.
    BugReports,
    /// The point ledger, newest first.
    PointLedger,
    /// Notifications.
    Notifications,
    /// Support tickets.
    SupportTickets,
    /// Marker recording that roster seeding has run.
    SeedMarker,
}

impl StateSlot {
    /// Every slot, in load order.
    pub const ALL: [Self; 9] = [
        Self::CurrentUser,
        Self::Roster,
        Self::History,
        Self::Wishlist,
        Self::BugReports,
        Self::PointLedger,
        Self::Notifications,
        Self::SupportTickets,
        Self::SeedMarker,
    ];

    /// Stable storage key for the slot.
    pub fn key(self) -> &'static str {
        match self {
            Self::CurrentUser => "appvault_user",
            Self::Roster => "appvault_users_db",
            Self::History => "appvault_history",
            Self::Wishlist => "appvault_wishlist",
            Self::BugReports => "appvault_bugs",
            Self::PointLedger => "appvault_points",
            Self::Notifications => "appvault_notifs",
            Self::SupportTickets => "appvault_support",
            Self::SeedMarker => "appvault_seeded",
        }
    }
}

/// Errors surfaced by slot store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateStoreError {
    /// The slot could not be read.
    #[error("failed to read slot {key}: {message}")]
    Read {
        /// Storage key of the slot.
        key: String,
        /// Adapter-specific failure description.
        message: String,
    },
    /// The slot could not be written.
    #[error("failed to write slot {key}: {message}")]
    Write {
        /// Storage key of the slot.
        key: String,
        /// Adapter-specific failure description.
        message: String,
    },
}

impl StateStoreError {
    /// Helper for read failures.
    pub fn read(slot: StateSlot, message: impl Into<String>) -> Self {
        Self::Read {
            key: slot.key().to_owned(),
            message: message.into(),
        }
    }

    /// Helper for write failures.
    pub fn write(slot: StateSlot, message: impl Into<String>) -> Self {
        Self::Write {
            key: slot.key().to_owned(),
            message: message.into(),
        }
    }
}

/// Port for durable slot storage.
///
/// Payloads are opaque serialized JSON; the engine owns serialization so
/// adapters stay dumb. A missing slot is `Ok(None)`, never an error; the
/// engine substitutes the documented default for the collection.
pub trait StateStore: Send + Sync {
    /// Read the payload stored in `slot`, if any.
    fn read(&self, slot: StateSlot) -> Result<Option<String>, StateStoreError>;

    /// Replace the payload stored in `slot`.
    fn write(&self, slot: StateSlot, payload: &str) -> Result<(), StateStoreError>;
}

/// Shared stores forward to the inner adapter, so the engine can own a store
/// the surrounding application also holds a handle to.
impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn read(&self, slot: StateSlot) -> Result<Option<String>, StateStoreError> {
        (**self).read(slot)
    }

    fn write(&self, slot: StateSlot, payload: &str) -> Result<(), StateStoreError> {
        (**self).write(slot, payload)
    }
}
