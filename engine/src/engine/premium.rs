//! Subscription upgrade flow.
//!
//! Pricing follows the documented formula: at rate R points per currency
//! unit and base price P, `max_redeemable = min(balance, P * R)`,
//! `discount = floor(max_redeemable / R)` when redeeming, and
//! `final_price = max(0, P - discount)`. The engine never calls the payment
//! provider from inside a mutation: [`Engine::purchase_premium`] awaits the
//! provider first and only then runs the synchronous upgrade transition.

use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{PaymentOutcome, PaymentProvider, StateSlot, StateStore};
use crate::domain::{EngineResult, Error, NotificationKind, SubscriptionStatus, User};

use super::Engine;

/// A point-discounted price computation for the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumQuote {
    /// Undiscounted monthly price in currency units.
    pub base_price: i64,
    /// Points that would be redeemed by accepting this quote.
    pub redeemed_points: i64,
    /// Discount in currency units.
    pub discount: i64,
    /// Amount the payment provider would be asked to charge.
    pub final_price: i64,
}

/// The settled result of a completed upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumReceipt {
    /// Subscription transaction id recorded on the account.
    pub transaction_id: String,
    /// Amount charged by the provider; zero for a full points discount.
    pub amount_charged: i64,
    /// Points redeemed against the price.
    pub redeemed_points: i64,
}

impl<S: StateStore> Engine<S> {
    /// Price the upgrade for the session user.
    ///
    /// With `redeem` disabled the quote carries no discount. Fractional
    /// conversion floors toward zero, so a balance below the rate yields a
    /// zero discount while still redeeming nothing.
    pub fn premium_quote(&self, redeem: bool) -> EngineResult<PremiumQuote> {
        let user = self.session_user()?;
        let base_price = self.config.premium_base_price;
        // A non-positive rate would divide by zero; treat it as 1:1.
        let rate = self.config.points_per_unit.max(1);
        let max_redeemable = user.points.min(base_price * rate);
        let (redeemed_points, discount) = if redeem {
            (max_redeemable, max_redeemable / rate)
        } else {
            (0, 0)
        };
        Ok(PremiumQuote {
            base_price,
            redeemed_points,
            discount,
            final_price: (base_price - discount).max(0),
        })
    }

    /// Flip the session user to premium, consuming a settled payment
    /// outcome.
    ///
    /// `redeemed_points` is the caller's pre-validated amount and may
    /// legitimately be zero; zero appends no ledger entry. The premium flag,
    /// subscription fields, balance decrement, and ledger entry commit as
    /// one step or not at all.
    pub fn upgrade(
        &mut self,
        redeemed_points: i64,
        transaction_id: Option<&str>,
    ) -> EngineResult<User> {
        let user = self.session_user()?;
        let user_id = user.id.clone();
        if redeemed_points < 0 {
            return Err(Error::invalid_request("redeemed points must not be negative"));
        }
        if redeemed_points > user.points {
            return Err(Error::invalid_request(format!(
                "cannot redeem {redeemed_points} points; balance is {}",
                user.points
            )));
        }

        let now = self.now();
        let subscription_id = transaction_id
            .map(str::to_owned)
            .unwrap_or_else(|| self.config.fallback_subscription_id.clone());
        let recorded_id = subscription_id.clone();
        self.state.update_user_record(&user_id, |user| {
            user.is_premium = true;
            user.subscription_status = SubscriptionStatus::Active;
            user.subscription_date = Some(now);
            user.subscription_id = Some(recorded_id);
        })?;
        // Balance was validated above; the redeem primitive cannot fail here.
        self.redeem_points(&user_id, redeemed_points, "Discount on Premium")?;
        self.push_notification(
            "Welcome to Premium",
            "Your account has been upgraded.",
            NotificationKind::Success,
        );
        info!(user_id = %user_id, redeemed_points, subscription_id, "premium upgrade applied");
        self.persist(&[
            StateSlot::Roster,
            StateSlot::CurrentUser,
            StateSlot::Notifications,
        ]);
        self.session_user().cloned()
    }

    /// Orchestrate a premium purchase against the payment collaborator.
    ///
    /// A fully discounted price skips the provider entirely; a zero charge
    /// is a valid terminal case, not a degenerate one. Otherwise the charge
    /// is attempted exactly once: a decline or transport failure surfaces as
    /// a collaborator error with no state mutated, and the engine never
    /// retries on the caller's behalf.
    pub async fn purchase_premium(
        &mut self,
        redeem: bool,
        provider: &dyn PaymentProvider,
    ) -> EngineResult<PremiumReceipt> {
        let quote = self.premium_quote(redeem)?;

        if quote.final_price == 0 {
            let transaction_id = format!("points_full_{}", Uuid::new_v4());
            self.upgrade(quote.redeemed_points, Some(&transaction_id))?;
            return Ok(PremiumReceipt {
                transaction_id,
                amount_charged: 0,
                redeemed_points: quote.redeemed_points,
            });
        }

        match provider.charge(quote.final_price).await {
            Ok(PaymentOutcome::Authorized { transaction_id }) => {
                self.upgrade(quote.redeemed_points, Some(&transaction_id))?;
                Ok(PremiumReceipt {
                    transaction_id,
                    amount_charged: quote.final_price,
                    redeemed_points: quote.redeemed_points,
                })
            }
            Ok(PaymentOutcome::Declined { reason }) => Err(Error::collaborator(format!(
                "payment declined: {reason}"
            ))),
            Err(err) => Err(Error::collaborator(format!(
                "payment provider failed: {err}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "premium_tests.rs"]
mod tests;
