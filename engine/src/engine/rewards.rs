//! Rewards ledger primitives.
//!
//! `grant_points` and `redeem_points` are the only places a point balance
//! moves. Each successful call mutates the roster entry (and the projection,
//! via the write-through helper) and prepends exactly one matching ledger
//! entry in the same logical transaction.

use tracing::debug;

use crate::domain::ports::{StateSlot, StateStore};
use crate::domain::{EngineResult, Error, PointTransaction, TransactionKind, UserId};

use super::Engine;

impl<S: StateStore> Engine<S> {
    /// Credit `amount` points to a user.
    ///
    /// An amount of zero or less is a no-op: no balance change and no
    /// zero-effect ledger entry.
    pub fn grant_points(
        &mut self,
        user_id: &UserId,
        amount: i64,
        reason: impl Into<String>,
    ) -> EngineResult<()> {
        if amount <= 0 {
            return Ok(());
        }
        self.state
            .update_user_record(user_id, |user| user.points += amount)?;
        self.append_transaction(user_id, amount, reason.into(), TransactionKind::Earned);
        self.persist(&[
            StateSlot::Roster,
            StateSlot::CurrentUser,
            StateSlot::PointLedger,
        ]);
        Ok(())
    }

    /// Debit `amount` points from a user.
    ///
    /// Redeeming more than the live balance is a validation error and leaves
    /// the state untouched; the engine never clamps. An amount of zero is a
    /// no-op, negative amounts are rejected.
    pub fn redeem_points(
        &mut self,
        user_id: &UserId,
        amount: i64,
        reason: impl Into<String>,
    ) -> EngineResult<()> {
        if amount < 0 {
            return Err(Error::invalid_request("redeem amount must not be negative"));
        }
        if amount == 0 {
            return Ok(());
        }
        let balance = self
            .state
            .find_user(user_id)
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))?
            .points;
        if amount > balance {
            return Err(Error::invalid_request(format!(
                "cannot redeem {amount} points; balance is {balance}"
            )));
        }
        self.state
            .update_user_record(user_id, |user| user.points -= amount)?;
        self.append_transaction(user_id, amount, reason.into(), TransactionKind::Redeemed);
        self.persist(&[
            StateSlot::Roster,
            StateSlot::CurrentUser,
            StateSlot::PointLedger,
        ]);
        Ok(())
    }

    fn append_transaction(
        &mut self,
        user_id: &UserId,
        amount: i64,
        reason: String,
        kind: TransactionKind,
    ) {
        debug!(user_id = %user_id, amount, ?kind, "ledger append");
        let entry = PointTransaction {
            id: self.next_id(),
            user_id: user_id.clone(),
            date: self.now(),
            amount,
            reason,
            kind,
        };
        self.state.ledger.insert(0, entry);
    }
}

#[cfg(test)]
#[path = "rewards_tests.rs"]
mod tests;
