//! The state container and its operation services.
//!
//! [`Engine`] is the single authority over all mutable collections. Every
//! operation is a single synchronous state-transition function taking
//! `&mut self`, so the borrow checker enforces the single-writer model the
//! design calls for: competing `login`/`signup` calls for a brand-new email
//! cannot interleave because they cannot coexist. Long-latency collaborator
//! work happens at the boundary, before or after the mutation, never inside
//! it.
//!
//! Persistence is write-on-mutate: after the in-memory transition completes,
//! the touched slots are written through the [`StateStore`] port. Store
//! failures are logged and the in-memory state stays authoritative for the
//! rest of the session; they never fail an operation.

mod activity;
mod bugs;
mod premium;
mod rewards;
mod seed;
mod session;
mod state;

use std::sync::Arc;

use mockable::Clock;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::ports::{StateSlot, StateStore};
use crate::domain::{
    AppId, BugReport, EngineResult, Error, HistoryItem, Notification, NotificationKind,
    PointTransaction, SupportTicket, User,
};

pub use bugs::BugResolution;
pub use premium::{PremiumQuote, PremiumReceipt};

use state::EngineState;

/// The client-side state and rewards-ledger engine.
///
/// Owns the seven entity collections plus the session-user projection, and
/// is the only place any of them are mutated.
pub struct Engine<S> {
    store: S,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    state: EngineState,
}

impl<S: StateStore> Engine<S> {
    /// Load engine state from the store, falling back to documented defaults
    /// for missing or unreadable slots, then seed the roster if it has never
    /// been populated.
    pub fn load(store: S, clock: Arc<dyn Clock>, config: EngineConfig) -> Self {
        let state = EngineState {
            current_user: read_slot(&store, StateSlot::CurrentUser).unwrap_or(None),
            roster: read_slot(&store, StateSlot::Roster).unwrap_or_default(),
            history: read_slot(&store, StateSlot::History).unwrap_or_default(),
            wishlist: read_slot(&store, StateSlot::Wishlist).unwrap_or_default(),
            bug_reports: read_slot(&store, StateSlot::BugReports).unwrap_or_default(),
            ledger: read_slot(&store, StateSlot::PointLedger).unwrap_or_default(),
            notifications: read_slot(&store, StateSlot::Notifications).unwrap_or_default(),
            support_tickets: read_slot(&store, StateSlot::SupportTickets).unwrap_or_default(),
            seeded: read_slot(&store, StateSlot::SeedMarker).unwrap_or(false),
        };

        let mut engine = Self {
            store,
            clock,
            config,
            state,
        };
        engine.reconcile_projection();
        engine.seed_roster_if_empty();
        engine
    }

    /// The session-user projection, if a user is signed in.
    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    /// Whether a session user exists.
    pub fn is_authenticated(&self) -> bool {
        self.state.current_user.is_some()
    }

    /// The canonical roster of all accounts.
    pub fn roster(&self) -> &[User] {
        &self.state.roster
    }

    /// Usage history, newest first.
    pub fn history(&self) -> &[HistoryItem] {
        &self.state.history
    }

    /// Saved-for-later app ids for the session user.
    pub fn wishlist(&self) -> &[AppId] {
        &self.state.wishlist
    }

    /// All bug reports, oldest first.
    pub fn bug_reports(&self) -> &[BugReport] {
        &self.state.bug_reports
    }

    /// The point ledger, newest first.
    pub fn ledger(&self) -> &[PointTransaction] {
        &self.state.ledger
    }

    /// Notifications, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    /// Support tickets, oldest first.
    pub fn support_tickets(&self) -> &[SupportTicket] {
        &self.state.support_tickets
    }

    /// The configuration the engine was loaded with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Mark a notification as read.
    pub fn mark_notification_read(&mut self, id: &str) -> EngineResult<()> {
        let entry = self
            .state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::not_found(format!("notification {id} not found")))?;
        entry.read = true;
        self.persist(&[StateSlot::Notifications]);
        Ok(())
    }

    /// The session user, or an unauthorized error.
    fn session_user(&self) -> EngineResult<&User> {
        self.state
            .current_user
            .as_ref()
            .ok_or_else(|| Error::unauthorized("no active session user"))
    }

    /// Current timestamp from the injected clock.
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.utc()
    }

    /// Fresh opaque identifier.
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Queue a notification, newest first. Callers persist the slot.
    fn push_notification(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) {
        let notification = Notification {
            id: self.next_id(),
            title: title.into(),
            message: message.into(),
            date: self.now(),
            read: false,
            kind,
        };
        self.state.notifications.insert(0, notification);
    }

    /// Replace a stale projection with its canonical roster entry.
    ///
    /// A projection persisted by an interrupted session can lag behind the
    /// roster; the roster entry is the source of truth, so the projection is
    /// refreshed from it, or cleared when the account no longer exists.
    /// Either correction is written back so the stored slot stops lagging
    /// too.
    fn reconcile_projection(&mut self) {
        let Some(projection) = self.state.current_user.as_ref() else {
            return;
        };
        match self.state.find_user(&projection.id) {
            Some(canonical) => {
                if canonical == projection {
                    return;
                }
                debug!(
                    user_id = %projection.id,
                    "refreshing stale session projection from roster"
                );
                self.state.current_user = Some(canonical.clone());
            }
            None => {
                warn!(
                    user_id = %projection.id,
                    "session projection references a deleted account; clearing session"
                );
                self.state.current_user = None;
            }
        }
        self.persist(&[StateSlot::CurrentUser]);
    }

    /// Write the given slots through to the store.
    ///
    /// Failures are logged; the in-memory state remains authoritative for
    /// the rest of the session.
    fn persist(&self, slots: &[StateSlot]) {
        for &slot in slots {
            let payload = match self.serialize_slot(slot) {
                Ok(payload) => payload,
                Err(error) => {
                    warn!(slot = slot.key(), %error, "slot serialization failed; skipping write");
                    continue;
                }
            };
            if let Err(error) = self.store.write(slot, &payload) {
                warn!(
                    slot = slot.key(),
                    %error,
                    "slot write failed; in-memory state remains authoritative"
                );
            }
        }
    }

    fn serialize_slot(&self, slot: StateSlot) -> Result<String, serde_json::Error> {
        match slot {
            StateSlot::CurrentUser => serde_json::to_string(&self.state.current_user),
            StateSlot::Roster => serde_json::to_string(&self.state.roster),
            StateSlot::History => serde_json::to_string(&self.state.history),
            StateSlot::Wishlist => serde_json::to_string(&self.state.wishlist),
            StateSlot::BugReports => serde_json::to_string(&self.state.bug_reports),
            StateSlot::PointLedger => serde_json::to_string(&self.state.ledger),
            StateSlot::Notifications => serde_json::to_string(&self.state.notifications),
            StateSlot::SupportTickets => serde_json::to_string(&self.state.support_tickets),
            StateSlot::SeedMarker => serde_json::to_string(&self.state.seeded),
        }
    }
}

/// Read and deserialize one slot, mapping every failure to "use the
/// documented default".
fn read_slot<S: StateStore, T: DeserializeOwned>(store: &S, slot: StateSlot) -> Option<T> {
    match store.read(slot) {
        Ok(Some(payload)) => match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(slot = slot.key(), %error, "stored payload unreadable; using default");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            warn!(slot = slot.key(), %error, "slot read failed; using default");
            None
        }
    }
}
