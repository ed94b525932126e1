//! Domain ports defining the edges of the engine.
//!
//! Ports describe how the engine expects to interact with driven adapters:
//! the durable slot store underneath the collections, and the asynchronous
//! collaborators (recommendation service, payment provider) whose results the
//! engine consumes but whose implementations it does not own. Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants.

mod payment;
mod recommendation;
mod state_store;

pub use payment::{FixturePaymentProvider, PaymentOutcome, PaymentProvider, PaymentProviderError};
pub use recommendation::{
    FixtureRecommendationService, RecommendationService, RecommendationServiceError,
};
pub use state_store::{StateSlot, StateStore, StateStoreError};

#[cfg(test)]
pub use payment::MockPaymentProvider;
#[cfg(test)]
pub use recommendation::MockRecommendationService;
