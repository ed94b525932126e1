//! Identity and session management.
//!
//! `login` resolves an email against the roster or provisions a fresh
//! account; unknown emails are the documented auto-provision path, not an
//! error. The session projection is always set by value-copying the
//! canonical roster entry.

use tracing::info;

use crate::domain::ports::{StateSlot, StateStore};
use crate::domain::{
    EmailAddress, EngineResult, Error, SubscriptionStatus, ThemePreference, User, UserId,
};

use super::Engine;

impl<S: StateStore> Engine<S> {
    /// Establish a session for `email`, provisioning an account on a roster
    /// miss.
    ///
    /// A provisioned account starts with the configured login balance; the
    /// reserved administrator address yields the fixed `admin` id with
    /// administrator rights, premium, and an active subscription. At most
    /// one roster entry ever exists per normalized email: the lookup and
    /// insert happen inside one `&mut self` call, so competing logins for a
    /// new email are serialized by construction.
    pub fn login(&mut self, email: &str) -> EngineResult<User> {
        let email = EmailAddress::new(email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        if let Some(existing) = self.state.find_user_by_email(&email) {
            let user = existing.clone();
            self.state.current_user = Some(user.clone());
            self.persist(&[StateSlot::CurrentUser]);
            return Ok(user);
        }

        let is_admin = email.normalized() == self.config.admin_email.to_lowercase();
        let id = if is_admin {
            // The reserved id may already belong to a seeded account under a
            // different configured address; roster ids stay unique.
            let reserved = UserId::new("admin").map_err(|err| Error::internal(err.to_string()))?;
            if self.state.find_user(&reserved).is_none() {
                reserved
            } else {
                UserId::random()
            }
        } else {
            UserId::random()
        };
        let name = if is_admin {
            "Admin User".to_owned()
        } else {
            format!("User {}", email.local_part())
        };
        let user = User {
            id,
            name,
            email,
            points: self.config.login_starting_points,
            is_premium: is_admin,
            avatar: String::new(),
            is_admin,
            joined_date: self.now(),
            theme_preference: ThemePreference::Dark,
            subscription_status: if is_admin {
                SubscriptionStatus::Active
            } else {
                SubscriptionStatus::Inactive
            },
            subscription_date: None,
            subscription_id: None,
        };
        info!(user_id = %user.id, admin = is_admin, "provisioned account at login");
        self.state.roster.push(user.clone());
        self.state.current_user = Some(user.clone());
        self.persist(&[StateSlot::Roster, StateSlot::CurrentUser]);
        Ok(user)
    }

    /// Create an account and establish a session.
    ///
    /// An email already on the roster falls back to [`Engine::login`], the
    /// documented idempotent behaviour, so a duplicate entry is never
    /// created.
    pub fn signup(&mut self, name: &str, email: &str) -> EngineResult<User> {
        let display_name = name.trim();
        if display_name.is_empty() {
            return Err(Error::invalid_request("display name must not be empty"));
        }
        let email = EmailAddress::new(email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        if self.state.find_user_by_email(&email).is_some() {
            return self.login(email.as_str());
        }

        let user = User {
            id: UserId::random(),
            name: display_name.to_owned(),
            email,
            points: self.config.signup_starting_points,
            is_premium: false,
            avatar: String::new(),
            is_admin: false,
            joined_date: self.now(),
            theme_preference: ThemePreference::Dark,
            subscription_status: SubscriptionStatus::Inactive,
            subscription_date: None,
            subscription_id: None,
        };
        info!(user_id = %user.id, "created account at signup");
        self.state.roster.push(user.clone());
        self.state.current_user = Some(user.clone());
        self.persist(&[StateSlot::Roster, StateSlot::CurrentUser]);
        Ok(user)
    }

    /// End the session.
    ///
    /// Clears the projection and the session-scoped collections (history,
    /// wishlist). The roster, ledger, bug reports, and support tickets are
    /// durable beyond the session and survive untouched.
    pub fn logout(&mut self) {
        self.state.current_user = None;
        self.state.history.clear();
        self.state.wishlist.clear();
        self.persist(&[
            StateSlot::CurrentUser,
            StateSlot::History,
            StateSlot::Wishlist,
        ]);
    }

    /// Remove a roster entry by id (administrative path).
    ///
    /// Deletion is unconditional once invoked; confirmation is the
    /// presentation layer's concern. Removing the account behind the active
    /// session additionally logs out.
    pub fn delete_user(&mut self, user_id: &UserId) -> EngineResult<()> {
        let before = self.state.roster.len();
        self.state.roster.retain(|user| user.id != *user_id);
        if self.state.roster.len() == before {
            return Err(Error::not_found(format!("user {user_id} not found")));
        }
        info!(user_id = %user_id, "deleted roster entry");

        let was_session_user = self
            .state
            .current_user
            .as_ref()
            .is_some_and(|current| current.id == *user_id);
        if was_session_user {
            self.logout();
        }
        self.persist(&[StateSlot::Roster]);
        Ok(())
    }

    /// Remove the session user's own account, then log out.
    pub fn delete_account(&mut self) -> EngineResult<()> {
        let id = self.session_user()?.id.clone();
        self.delete_user(&id)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
