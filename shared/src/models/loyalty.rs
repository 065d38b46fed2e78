//! Loyalty balance model

use serde::{Deserialize, Serialize};

/// Result of resolving a phone number against the remote loyalty ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyBalance {
    /// Distinguishes "no such customer" from "customer with zero points"
    pub exists: bool,
    pub points: i64,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Currency value of one point. Non-positive disables redemption.
    pub redemption_rate: f64,
    /// Ceiling discount this balance can provide (points * redemption_rate).
    /// Pre-computed by the ledger, never recomputed locally.
    pub max_discount: f64,
}

impl LoyaltyBalance {
    /// Whether this balance can back a redemption at all
    pub fn redeemable(&self) -> bool {
        self.exists && self.points > 0 && self.redemption_rate > 0.0
    }
}
