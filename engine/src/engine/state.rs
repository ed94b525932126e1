//! In-memory collection state and the write-through user update.

use tracing::debug;

use crate::domain::{
    AppId, BugReport, EmailAddress, EngineResult, Error, HistoryItem, Notification,
    PointTransaction, SupportTicket, User, UserId,
};

/// The seven entity collections plus the session projection and seed marker.
///
/// Collections keep the orderings the presentation layer relies on: history,
/// ledger, and notifications are newest first; the roster, bug reports, and
/// support tickets are insertion order.
#[derive(Debug, Default)]
pub(super) struct EngineState {
    pub(super) current_user: Option<User>,
    pub(super) roster: Vec<User>,
    pub(super) history: Vec<HistoryItem>,
    pub(super) wishlist: Vec<AppId>,
    pub(super) bug_reports: Vec<BugReport>,
    pub(super) ledger: Vec<PointTransaction>,
    pub(super) notifications: Vec<Notification>,
    pub(super) support_tickets: Vec<SupportTicket>,
    pub(super) seeded: bool,
}

impl EngineState {
    /// Look a roster entry up by id.
    pub(super) fn find_user(&self, id: &UserId) -> Option<&User> {
        self.roster.iter().find(|user| user.id == *id)
    }

    /// Look a roster entry up by normalized email.
    pub(super) fn find_user_by_email(&self, email: &EmailAddress) -> Option<&User> {
        self.roster.iter().find(|user| user.email.matches(email))
    }

    /// Whether another roster entry already owns this normalized email.
    pub(super) fn email_taken_by_other(&self, email: &EmailAddress, id: &UserId) -> bool {
        self.roster
            .iter()
            .any(|user| user.id != *id && user.email.matches(email))
    }

    /// Apply a mutation to a roster entry and write it through to the
    /// session projection when the ids match.
    ///
    /// This is the only path that touches user fields, so the
    /// projection/roster sync invariant holds by construction: the roster
    /// entry is mutated first and then cloned wholesale into the projection
    /// inside the same call.
    pub(super) fn update_user_record<F>(&mut self, id: &UserId, apply: F) -> EngineResult<()>
    where
        F: FnOnce(&mut User),
    {
        let entry = self
            .roster
            .iter_mut()
            .find(|user| user.id == *id)
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        apply(entry);
        let updated = entry.clone();

        if self
            .current_user
            .as_ref()
            .is_some_and(|current| current.id == *id)
        {
            debug!(user_id = %id, "write-through to session projection");
            self.current_user = Some(updated);
        }
        Ok(())
    }
}
