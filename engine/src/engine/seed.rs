//! First-run roster seeding.
//!
//! An empty roster is seeded exactly once with a fixed set of accounts. The
//! seed marker slot records that seeding ran, so deleting every seeded
//! account later never triggers a rerun.

use chrono::Duration;
use tracing::info;

use crate::domain::ports::{StateSlot, StateStore};
use crate::domain::{EmailAddress, SubscriptionStatus, ThemePreference, User, UserId};

use super::Engine;

struct SeedAccount {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    points: i64,
    is_premium: bool,
    is_admin: bool,
    joined_days_ago: i64,
    theme: ThemePreference,
    subscription: SubscriptionStatus,
}

const SEED_ACCOUNTS: [SeedAccount; 3] = [
    SeedAccount {
        id: "admin",
        name: "System Admin",
        email: "admin@appvault.com",
        points: 5000,
        is_premium: true,
        is_admin: true,
        joined_days_ago: 0,
        theme: ThemePreference::Dark,
        subscription: SubscriptionStatus::Active,
    },
    SeedAccount {
        id: "u1",
        name: "Alice Walker",
        email: "alice@example.com",
        points: 340,
        is_premium: true,
        is_admin: false,
        joined_days_ago: 30,
        theme: ThemePreference::Dark,
        subscription: SubscriptionStatus::Active,
    },
    SeedAccount {
        id: "u2",
        name: "Bob Builder",
        email: "bob@construction.com",
        points: 20,
        is_premium: false,
        is_admin: false,
        joined_days_ago: 5,
        theme: ThemePreference::Light,
        subscription: SubscriptionStatus::Inactive,
    },
];

impl<S: StateStore> Engine<S> {
    /// Seed the roster with the fixed demo accounts when it has never been
    /// populated. Idempotent: a non-empty roster or a set marker skips.
    pub(super) fn seed_roster_if_empty(&mut self) {
        if self.state.seeded || !self.state.roster.is_empty() {
            if !self.state.seeded {
                // Pre-marker data directory; record that seeding is done.
                self.state.seeded = true;
                self.persist(&[StateSlot::SeedMarker]);
            }
            return;
        }

        let now = self.now();
        for account in &SEED_ACCOUNTS {
            // Seed literals are compile-time constants; construction cannot
            // fail, but the validated paths are used all the same.
            let (Ok(id), Ok(email)) = (
                UserId::new(account.id),
                EmailAddress::new(account.email),
            ) else {
                continue;
            };
            self.state.roster.push(User {
                id,
                name: account.name.to_owned(),
                email,
                points: account.points,
                is_premium: account.is_premium,
                avatar: String::new(),
                is_admin: account.is_admin,
                joined_date: now - Duration::days(account.joined_days_ago),
                theme_preference: account.theme,
                subscription_status: account.subscription,
                subscription_date: None,
                subscription_id: None,
            });
        }
        self.state.seeded = true;
        info!(count = self.state.roster.len(), "seeded empty roster");
        self.persist(&[StateSlot::Roster, StateSlot::SeedMarker]);
    }
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;
