//! Checkout form models

use serde::{Deserialize, Serialize};

/// How the guest wants the order fulfilled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Delivery,
    Takeaway,
}

/// The in-progress checkout form.
///
/// Owned by the flow controller; reset to empty whenever the checkout surface
/// is closed or an order is successfully submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub order_type: OrderType,
    pub notes: String,
    pub redeem_points: bool,
}

impl CheckoutDraft {
    /// Submit gate: name and phone filled, and an address when delivering.
    ///
    /// Computed on demand, never stored; no network round-trip involved.
    pub fn is_submittable(&self) -> bool {
        !self.customer_name.trim().is_empty()
            && !self.customer_phone.trim().is_empty()
            && (self.order_type != OrderType::Delivery
                || !self.customer_address.trim().is_empty())
    }
}

/// Outcome of the discount calculation for the current render.
///
/// Recomputed from cart totals + loyalty balance + the redeem toggle on every
/// relevant input change; never persisted, never mutated directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    pub loyalty_discount: f64,
    pub points_to_redeem: i64,
}
