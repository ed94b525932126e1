//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Reserved administrator address recognised at login.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@appvault.com";

/// Tunable constants for the rewards economy and session provisioning.
///
/// The defaults reproduce the documented behaviour: a 199-unit monthly
/// premium price discounted at 10 points per unit, a 50-point frozen bug
/// reward, and 100/50 starting balances for auto-provisioned and signed-up
/// accounts respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Email address that provisions an administrator account at login.
    pub admin_email: String,
    /// Monthly premium base price in currency units.
    pub premium_base_price: i64,
    /// Points redeemed per currency unit of discount.
    pub points_per_unit: i64,
    /// Reward frozen onto each bug report at submission.
    pub bug_reward_points: i64,
    /// Starting balance for accounts auto-provisioned by `login`.
    pub login_starting_points: i64,
    /// Starting balance for accounts created by `signup`.
    pub signup_starting_points: i64,
    /// Points granted per recorded usage session.
    pub usage_reward_points: i64,
    /// Sentinel subscription id used when no external transaction id was
    /// supplied to the upgrade.
    pub fallback_subscription_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_owned(),
            premium_base_price: 199,
            points_per_unit: 10,
            bug_reward_points: 50,
            login_starting_points: 100,
            signup_starting_points: 50,
            usage_reward_points: 1,
            fallback_subscription_id: "manual_upgrade".to_owned(),
        }
    }
}
