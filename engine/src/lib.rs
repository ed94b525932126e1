//! Client-side state and rewards-ledger engine.
//!
//! The engine owns every mutable collection of the application (the account
//! roster, the session-user projection, usage history, wishlist, bug
//! reports, the point ledger, notifications, and support tickets) and
//! exposes each state change as a synchronous operation on [`engine::Engine`].
//!
//! The design is hexagonal: domain entities and operations live in
//! [`domain`] and [`engine`], outbound concerns are ports
//! ([`domain::ports`]) with adapters under [`outbound`]. Persistence is a
//! slot-per-collection JSON store loaded on startup and written through on
//! every mutation; a failing store degrades the session to in-memory
//! operation instead of failing user actions.

pub mod config;
pub mod discovery;
pub mod domain;
pub mod engine;
pub mod outbound;

#[cfg(test)]
mod test_support;
