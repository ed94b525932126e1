//! Catalog interaction: usage history, wishlist, profile updates, support.

use tracing::debug;

use crate::domain::ports::{StateSlot, StateStore};
use crate::domain::{
    AppId, AppRecord, EngineResult, Error, HistoryItem, SupportTicket, TicketStatus, User,
    UserPatch,
};

use super::Engine;

impl<S: StateStore> Engine<S> {
    /// Record a usage session for a catalog app.
    ///
    /// Always prepends exactly one history entry with a denormalized app
    /// snapshot, so history survives catalog edits. When a session user
    /// exists the usage reward is granted through the ledger; without one
    /// the history entry is still recorded and no transaction is created.
    pub fn record_usage(&mut self, app: &AppRecord, duration_seconds: u64) -> HistoryItem {
        let item = HistoryItem {
            id: self.next_id(),
            app_id: app.id.clone(),
            app_name: app.name.clone(),
            app_icon: app.icon.clone(),
            timestamp: self.now(),
            duration_seconds,
        };
        self.state.history.insert(0, item.clone());
        self.persist(&[StateSlot::History]);

        if let Some(user) = self.state.current_user.as_ref() {
            let user_id = user.id.clone();
            let reward = self.config.usage_reward_points;
            let reason = format!("Used {}", app.name);
            // The session user is on the roster by the sync invariant, so
            // the grant cannot fail.
            if let Err(error) = self.grant_points(&user_id, reward, reason) {
                debug!(%error, "usage reward grant skipped");
            }
        }
        item
    }

    /// Toggle an app in the session wishlist.
    ///
    /// Symmetric and self-inverse: toggling twice restores the original
    /// membership. Returns whether the app is present afterwards.
    pub fn toggle_wishlist(&mut self, app_id: &AppId) -> bool {
        let before = self.state.wishlist.len();
        self.state.wishlist.retain(|id| id != app_id);
        let present = if self.state.wishlist.len() == before {
            self.state.wishlist.push(app_id.clone());
            true
        } else {
            false
        };
        self.persist(&[StateSlot::Wishlist]);
        present
    }

    /// Shallow-merge profile fields into the session user and its roster
    /// entry in one step.
    ///
    /// An email change must not collide with another account's normalized
    /// address; the whole patch is rejected before anything is applied.
    pub fn update_user(&mut self, patch: UserPatch) -> EngineResult<User> {
        let user_id = self.session_user()?.id.clone();
        if let Some(email) = patch.email.as_ref()
            && self.state.email_taken_by_other(email, &user_id)
        {
            return Err(Error::invalid_request(format!(
                "email {email} already belongs to another account"
            )));
        }
        if let Some(name) = patch.name.as_ref()
            && name.trim().is_empty()
        {
            return Err(Error::invalid_request("display name must not be empty"));
        }

        self.state.update_user_record(&user_id, |user| {
            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(avatar) = patch.avatar {
                user.avatar = avatar;
            }
            if let Some(theme) = patch.theme_preference {
                user.theme_preference = theme;
            }
        })?;
        self.persist(&[StateSlot::Roster, StateSlot::CurrentUser]);
        self.session_user().cloned()
    }

    /// Flip the session user's theme preference.
    pub fn toggle_theme(&mut self) -> EngineResult<User> {
        let next = self.session_user()?.theme_preference.toggled();
        self.update_user(UserPatch {
            theme_preference: Some(next),
            ..UserPatch::default()
        })
    }

    /// File a support ticket for the session user. Tickets are always
    /// created open.
    pub fn submit_support(&mut self, subject: &str, message: &str) -> EngineResult<SupportTicket> {
        let subject = subject.trim();
        let message = message.trim();
        if subject.is_empty() || message.is_empty() {
            return Err(Error::invalid_request(
                "support subject and message must not be empty",
            ));
        }
        let user_id = self.session_user()?.id.clone();
        let ticket = SupportTicket {
            id: self.next_id(),
            user_id,
            subject: subject.to_owned(),
            message: message.to_owned(),
            date: self.now(),
            status: TicketStatus::Open,
            admin_reply: None,
        };
        self.state.support_tickets.push(ticket.clone());
        self.persist(&[StateSlot::SupportTickets]);
        Ok(ticket)
    }

    /// Close a support ticket with an optional administrator reply.
    ///
    /// Closing an already-closed ticket is a defined no-op.
    pub fn close_support(&mut self, ticket_id: &str, reply: Option<&str>) -> EngineResult<()> {
        let ticket = self
            .state
            .support_tickets
            .iter_mut()
            .find(|ticket| ticket.id == ticket_id)
            .ok_or_else(|| Error::not_found(format!("support ticket {ticket_id} not found")))?;
        if ticket.status == TicketStatus::Closed {
            return Ok(());
        }
        ticket.status = TicketStatus::Closed;
        ticket.admin_reply = reply.map(str::to_owned);
        self.persist(&[StateSlot::SupportTickets]);
        Ok(())
    }
}

#[cfg(test)]
#[path = "activity_tests.rs"]
mod tests;
