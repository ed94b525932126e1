//! In-memory slot store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ports::{StateSlot, StateStore, StateStoreError};

/// Slot store backed by a mutex-guarded map.
///
/// Used for ephemeral sessions and as the test double of choice. Write
/// failures can be injected to exercise the engine's degraded-persistence
/// path.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: Mutex<HashMap<&'static str, String>>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the payload currently stored in `slot`.
    #[must_use]
    pub fn payload(&self, slot: StateSlot) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(slot.key())
            .cloned()
    }
}

impl StateStore for InMemoryStore {
    fn read(&self, slot: StateSlot) -> Result<Option<String>, StateStoreError> {
        Ok(self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(slot.key())
            .cloned())
    }

    fn write(&self, slot: StateSlot, payload: &str) -> Result<(), StateStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StateStoreError::write(slot, "injected write failure"));
        }
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(slot.key(), payload.to_owned());
        Ok(())
    }
}
