//! Port for the external payment provider.
//!
//! The engine never initiates retries and never mutates state until a
//! success outcome resolves; a declined charge or a transport failure
//! degrades to "no upgrade performed".

use async_trait::async_trait;
use thiserror::Error;

/// Final outcome of a charge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The charge settled.
    Authorized {
        /// Opaque provider transaction identifier.
        transaction_id: String,
    },
    /// The provider refused the charge.
    Declined {
        /// Human-readable refusal reason.
        reason: String,
    },
}

/// Errors raised by payment provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentProviderError {
    /// The provider could not be reached or timed out.
    #[error("payment provider unreachable: {message}")]
    Unreachable {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl PaymentProviderError {
    /// Helper for transport-level failures.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Port for charging the subscription price.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Attempt to charge `amount` currency units.
    async fn charge(&self, amount: i64) -> Result<PaymentOutcome, PaymentProviderError>;
}

/// Fixture provider that authorizes every charge with a fixed id.
///
/// Use it in tests where payment behaviour is not under test.
#[derive(Debug, Default, Clone)]
pub struct FixturePaymentProvider;

#[async_trait]
impl PaymentProvider for FixturePaymentProvider {
    async fn charge(&self, _amount: i64) -> Result<PaymentOutcome, PaymentProviderError> {
        Ok(PaymentOutcome::Authorized {
            transaction_id: "fixture_payment".to_owned(),
        })
    }
}
