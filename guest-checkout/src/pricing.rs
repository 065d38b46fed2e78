//! Totals and loyalty discount calculation
//!
//! Pure functions over (subtotal, loyalty balance, redeem toggle); no state.
//! All arithmetic runs on `Decimal` and is rounded to 2dp at the edges.

use rust_decimal::prelude::*;
use shared::models::{DiscountResult, LoyaltyBalance};
use shared::money::{to_decimal, to_f64};

/// Flat VAT rate applied uniformly to the subtotal (15%).
/// Fixed by the ordering surface; not configurable within this engine.
pub const VAT_RATE: f64 = 0.15;

fn vat_rate() -> Decimal {
    // 0.15 exactly
    Decimal::new(15, 2)
}

/// VAT amount for a subtotal
pub fn vat(subtotal: f64) -> f64 {
    to_f64(to_decimal(subtotal) * vat_rate())
}

/// Subtotal plus VAT, before any loyalty discount
pub fn gross_total(subtotal: f64) -> f64 {
    to_f64(to_decimal(subtotal) * (Decimal::ONE + vat_rate()))
}

/// Gross total minus the loyalty discount
pub fn final_total(subtotal: f64, discount: &DiscountResult) -> f64 {
    to_f64(to_decimal(gross_total(subtotal)) - to_decimal(discount.loyalty_discount))
}

/// Loyalty discount under the two redemption policies.
///
/// Full coverage (the balance's max discount meets the gross total): discount
/// the whole order and redeem only the points actually needed, rounded **up**
/// so the remote side is never asked to honor a discount larger than the
/// points it is told to debit. Partial coverage: redeem the entire balance
/// and cap the discount at its value.
///
/// A non-positive redemption rate makes the full-coverage division undefined
/// and is treated as "redemption unavailable", not as an error.
pub fn calculate_discount(
    subtotal: f64,
    balance: Option<&LoyaltyBalance>,
    redeem_points: bool,
) -> DiscountResult {
    let Some(balance) = balance else {
        return DiscountResult::default();
    };
    if !redeem_points || !balance.redeemable() {
        return DiscountResult::default();
    }

    let gross = to_decimal(gross_total(subtotal));
    let rate = to_decimal(balance.redemption_rate);
    let max_discount = to_decimal(balance.max_discount);

    if max_discount >= gross {
        let points = (gross / rate).ceil().to_i64().unwrap_or(balance.points);
        DiscountResult {
            loyalty_discount: to_f64(gross),
            points_to_redeem: points,
        }
    } else {
        DiscountResult {
            loyalty_discount: to_f64(max_discount),
            points_to_redeem: balance.points,
        }
    }
}
