//! Slot store adapters.
//!
//! [`JsonFileStore`] is the durable adapter: one JSON file per slot inside a
//! capability-scoped directory, written atomically. [`InMemoryStore`] backs
//! tests and ephemeral sessions.

mod json_store;
mod memory;

pub use json_store::JsonFileStore;
pub use memory::InMemoryStore;
