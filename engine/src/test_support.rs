//! Shared fixtures for engine unit tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use crate::config::EngineConfig;
use crate::domain::{AppId, AppRecord, Category, UserId};
use crate::engine::Engine;
use crate::outbound::persistence::InMemoryStore;

/// Clock test double whose reading can be moved forward mid-test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += delta;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A fixed, readable test instant.
pub fn test_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

/// An engine over a shared in-memory store and mutable clock, loaded with
/// default configuration. Loading seeds the demo roster.
pub fn fixture_engine() -> (
    Arc<InMemoryStore>,
    Arc<MutableClock>,
    Engine<Arc<InMemoryStore>>,
) {
    fixture_engine_with(EngineConfig::default())
}

/// Same as [`fixture_engine`] but with caller-supplied configuration.
pub fn fixture_engine_with(
    config: EngineConfig,
) -> (
    Arc<InMemoryStore>,
    Arc<MutableClock>,
    Engine<Arc<InMemoryStore>>,
) {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(MutableClock::new(test_instant()));
    let engine = Engine::load(Arc::clone(&store), clock.clone(), config);
    (store, clock, engine)
}

/// A minimal catalog record for exercising history and wishlist paths.
pub fn sample_app(id: &str, name: &str) -> AppRecord {
    AppRecord {
        id: AppId::new(id).expect("valid app id"),
        name: name.to_owned(),
        description: format!("{name} description"),
        icon: "📦".to_owned(),
        category: Category::Utilities,
        primary_url: format!("https://run.appvault.test/{id}"),
        failover_url: format!("https://backup.appvault.test/{id}"),
        is_premium: false,
        rating: 4.5,
        plays: 1200,
    }
}

pub fn uid(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}
