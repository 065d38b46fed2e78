//! Checkout flow controller
//!
//! Two-stage view state machine (cart view ⇄ checkout view) plus the
//! customer-detail form and the loyalty redemption toggle. The controller is
//! the synchronous core: every method here is a plain state transition, which
//! keeps the whole flow unit-testable without a runtime. The async shell that
//! drives remote calls and the deferred close-reset lives in [`session`].

pub mod session;

use shared::models::{CheckoutDraft, DiscountResult, LoyaltyBalance, MenuItemInfo, OrderType};
use shared::order::GuestOrderPayload;

use crate::cart::CartStore;
use crate::error::CheckoutError;
use crate::gateway::build_order_payload;
use crate::loyalty::MIN_PHONE_LEN;
use crate::pricing;

/// Which surface the guest is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutView {
    #[default]
    Cart,
    Checkout,
}

/// Per-session checkout state machine.
///
/// Owns the cart, the draft form, the resolved loyalty balance, and the
/// submission mutual-exclusion flag. All mutation is synchronous; async
/// operations snapshot what they need, run, and reconcile through
/// `apply_lookup` / `finish_submit`.
#[derive(Debug, Default)]
pub struct CheckoutController {
    cart: CartStore,
    draft: CheckoutDraft,
    view: CheckoutView,
    balance: Option<LoyaltyBalance>,
    /// Bumped on every phone edit; a lookup resolution carrying an older
    /// generation is discarded as stale.
    lookup_generation: u64,
    submit_in_flight: bool,
    /// Idempotency key for the current submission attempt. Reused across
    /// retries of the same order, re-minted after a success.
    pending_request_id: Option<String>,
}

impl CheckoutController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cart(cart: CartStore) -> Self {
        Self {
            cart,
            ..Self::default()
        }
    }

    // === Cart access (called by the menu-browsing surface) ===

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn add_item(&mut self, item: &MenuItemInfo) {
        self.cart.add_line(item);
    }

    pub fn set_quantity(&mut self, item_id: &str, quantity: i32) {
        self.cart.set_quantity(item_id, quantity);
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.cart.remove_line(item_id);
    }

    // === View transitions ===

    pub fn view(&self) -> CheckoutView {
        self.view
    }

    /// Cart → Checkout, guarded only by the cart being non-empty
    pub fn proceed_to_checkout(&mut self) -> Result<(), CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.view = CheckoutView::Checkout;
        Ok(())
    }

    /// Checkout → Cart. Form field values are retained so the guest does not
    /// lose typed input by accident.
    pub fn back_to_cart(&mut self) {
        self.view = CheckoutView::Cart;
    }

    /// Full reset after the checkout surface closes.
    ///
    /// Runs after the close grace delay, not at close time, so a closing
    /// animation is not interrupted by an instant field wipe. An in-flight
    /// submission is deliberately not cancelled; its result still lands.
    pub fn reset_after_close(&mut self) {
        self.view = CheckoutView::Cart;
        self.draft = CheckoutDraft::default();
        self.balance = None;
        self.lookup_generation += 1;
        self.pending_request_id = None;
    }

    // === Draft form ===

    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.draft.customer_name = name.into();
    }

    /// Update the phone field.
    ///
    /// Any edit invalidates an in-flight lookup; dropping below the minimum
    /// length additionally discards the held balance and forces the redeem
    /// toggle off — a stale balance must never be usable for a phone number
    /// that no longer matches it.
    pub fn set_customer_phone(&mut self, phone: impl Into<String>) {
        self.draft.customer_phone = phone.into();
        self.lookup_generation += 1;
        if self.draft.customer_phone.chars().count() < MIN_PHONE_LEN {
            self.draft.redeem_points = false;
            self.balance = None;
        }
    }

    pub fn set_customer_address(&mut self, address: impl Into<String>) {
        self.draft.customer_address = address.into();
    }

    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.draft.order_type = order_type;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// Toggle point redemption. Turning it on is ignored while no redeemable
    /// balance is held.
    pub fn set_redeem_points(&mut self, redeem: bool) {
        if redeem && !self.redemption_available() {
            return;
        }
        self.draft.redeem_points = redeem;
    }

    // === Loyalty ===

    pub fn balance(&self) -> Option<&LoyaltyBalance> {
        self.balance.as_ref()
    }

    /// Whether the redemption controls should be offered at all
    pub fn redemption_available(&self) -> bool {
        self.balance.as_ref().is_some_and(LoyaltyBalance::redeemable)
    }

    /// Snapshot the inputs for a loyalty lookup.
    ///
    /// Returns the generation + phone the resolution must be reconciled
    /// against, or `None` when the phone is too short (precondition, not an
    /// error — no lookup is attempted).
    pub fn begin_lookup(&self) -> Option<(u64, String)> {
        if self.draft.customer_phone.chars().count() < MIN_PHONE_LEN {
            return None;
        }
        Some((self.lookup_generation, self.draft.customer_phone.clone()))
    }

    /// Apply a resolved balance. Returns false (and changes nothing) when the
    /// phone has been edited since the lookup was triggered.
    pub fn apply_lookup(&mut self, generation: u64, balance: LoyaltyBalance) -> bool {
        if generation != self.lookup_generation {
            return false;
        }
        self.balance = Some(balance);
        true
    }

    /// Record a failed lookup: no balance available, redemption hidden.
    /// Returns false when the failure belongs to a superseded lookup.
    pub fn fail_lookup(&mut self, generation: u64) -> bool {
        if generation != self.lookup_generation {
            return false;
        }
        self.balance = None;
        self.draft.redeem_points = false;
        true
    }

    // === Discount ===

    /// Recompute the discount from current cart totals, balance, and toggle
    pub fn discount(&self) -> DiscountResult {
        pricing::calculate_discount(
            self.cart.subtotal(),
            self.balance.as_ref(),
            self.draft.redeem_points,
        )
    }

    // === Submission ===

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.submit_in_flight && self.draft.is_submittable()
    }

    pub fn submit_in_flight(&self) -> bool {
        self.submit_in_flight
    }

    /// Validate, mark the submission in flight, and assemble the payload.
    ///
    /// Only one submission may be in flight at a time; callers must follow up
    /// with `finish_submit` once the remote call completes.
    pub fn begin_submit(&mut self) -> Result<GuestOrderPayload, CheckoutError> {
        if self.submit_in_flight {
            return Err(CheckoutError::SubmissionInFlight);
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if !self.draft.is_submittable() {
            return Err(CheckoutError::IncompleteDraft);
        }

        let request_id = self
            .pending_request_id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        let payload = build_order_payload(&self.draft, &self.cart, &self.discount(), request_id);
        self.submit_in_flight = true;
        Ok(payload)
    }

    /// Reconcile local state once the remote call completes.
    ///
    /// Success clears the cart, resets the draft, and returns to the cart
    /// view. Failure leaves cart, draft, and view untouched so the guest can
    /// retry without re-entering anything.
    pub fn finish_submit(&mut self, success: bool) {
        self.submit_in_flight = false;
        if success {
            self.cart.clear();
            self.draft = CheckoutDraft::default();
            self.balance = None;
            self.lookup_generation += 1;
            self.pending_request_id = None;
            self.view = CheckoutView::Cart;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::LocalizedName;

    fn item(id: &str, price: f64) -> MenuItemInfo {
        MenuItemInfo {
            id: id.to_string(),
            name: LocalizedName::new(format!("Item {id}")),
            price,
            image_ref: None,
        }
    }

    fn balance(points: i64, rate: f64, max_discount: f64) -> LoyaltyBalance {
        LoyaltyBalance {
            exists: true,
            points,
            customer_name: Some("Ana".to_string()),
            redemption_rate: rate,
            max_discount,
        }
    }

    fn filled_controller() -> CheckoutController {
        let mut ctrl = CheckoutController::new();
        ctrl.add_item(&item("a", 100.0));
        ctrl.set_customer_name("Ana");
        ctrl.set_customer_phone("612345678");
        ctrl.set_order_type(OrderType::Takeaway);
        ctrl
    }

    #[test]
    fn test_proceed_requires_non_empty_cart() {
        let mut ctrl = CheckoutController::new();
        assert!(matches!(
            ctrl.proceed_to_checkout(),
            Err(CheckoutError::EmptyCart)
        ));
        assert_eq!(ctrl.view(), CheckoutView::Cart);

        ctrl.add_item(&item("a", 5.0));
        ctrl.proceed_to_checkout().unwrap();
        assert_eq!(ctrl.view(), CheckoutView::Checkout);
    }

    #[test]
    fn test_back_to_cart_retains_draft() {
        let mut ctrl = filled_controller();
        ctrl.proceed_to_checkout().unwrap();
        ctrl.back_to_cart();

        assert_eq!(ctrl.view(), CheckoutView::Cart);
        assert_eq!(ctrl.draft().customer_name, "Ana");
        assert_eq!(ctrl.draft().customer_phone, "612345678");
    }

    #[test]
    fn test_phone_truncation_invalidates_balance_and_toggle() {
        let mut ctrl = filled_controller();
        let (generation, _) = ctrl.begin_lookup().unwrap();
        assert!(ctrl.apply_lookup(generation, balance(500, 0.10, 50.0)));
        ctrl.set_redeem_points(true);
        assert!(ctrl.draft().redeem_points);

        ctrl.set_customer_phone("6123456");

        assert!(!ctrl.draft().redeem_points);
        assert!(ctrl.balance().is_none());
        assert_eq!(ctrl.discount(), DiscountResult::default());
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let mut ctrl = filled_controller();
        let (generation, phone) = ctrl.begin_lookup().unwrap();
        assert_eq!(phone, "612345678");

        // Phone changes while the lookup is in flight
        ctrl.set_customer_phone("698765432");

        assert!(!ctrl.apply_lookup(generation, balance(500, 0.10, 50.0)));
        assert!(ctrl.balance().is_none());
    }

    #[test]
    fn test_stale_lookup_failure_is_discarded() {
        let mut ctrl = filled_controller();
        let (generation, _) = ctrl.begin_lookup().unwrap();

        ctrl.set_customer_phone("698765432");
        let (generation2, _) = ctrl.begin_lookup().unwrap();
        assert!(ctrl.apply_lookup(generation2, balance(500, 0.10, 50.0)));

        // The old lookup failing must not wipe the newer balance
        assert!(!ctrl.fail_lookup(generation));
        assert!(ctrl.balance().is_some());
    }

    #[test]
    fn test_short_phone_skips_lookup() {
        let mut ctrl = CheckoutController::new();
        ctrl.set_customer_phone("1234567");
        assert!(ctrl.begin_lookup().is_none());
    }

    #[test]
    fn test_phone_minimum_counts_characters_not_bytes() {
        let mut ctrl = filled_controller();
        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(500, 0.10, 50.0));
        ctrl.set_redeem_points(true);

        // Seven fullwidth digits: 21 bytes but only 7 characters, still
        // below the minimum
        ctrl.set_customer_phone("６１２３４５６");

        assert!(ctrl.begin_lookup().is_none());
        assert!(ctrl.balance().is_none());
        assert!(!ctrl.draft().redeem_points);

        // Eight characters is enough regardless of byte width
        ctrl.set_customer_phone("６１２３４５６７");
        assert!(ctrl.begin_lookup().is_some());
    }

    #[test]
    fn test_redeem_toggle_needs_redeemable_balance() {
        let mut ctrl = filled_controller();
        ctrl.set_redeem_points(true);
        assert!(!ctrl.draft().redeem_points);

        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(0, 0.10, 0.0));
        ctrl.set_redeem_points(true);
        assert!(!ctrl.draft().redeem_points);

        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(500, 0.10, 50.0));
        ctrl.set_redeem_points(true);
        assert!(ctrl.draft().redeem_points);
    }

    #[test]
    fn test_lookup_failure_hides_redemption() {
        let mut ctrl = filled_controller();
        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(500, 0.10, 50.0));
        ctrl.set_redeem_points(true);

        let (generation, _) = ctrl.begin_lookup().unwrap();
        assert!(ctrl.fail_lookup(generation));

        assert!(ctrl.balance().is_none());
        assert!(!ctrl.draft().redeem_points);
        assert!(!ctrl.redemption_available());
    }

    #[test]
    fn test_submit_gate_delivery_vs_takeaway() {
        let mut ctrl = filled_controller();
        ctrl.set_order_type(OrderType::Delivery);
        assert!(!ctrl.can_submit());

        ctrl.set_customer_address("Calle Mayor 1");
        assert!(ctrl.can_submit());

        ctrl.set_customer_address("");
        ctrl.set_order_type(OrderType::Takeaway);
        assert!(ctrl.can_submit());
    }

    #[test]
    fn test_begin_submit_excludes_concurrent_attempts() {
        let mut ctrl = filled_controller();
        let payload = ctrl.begin_submit().unwrap();
        assert_eq!(payload.customer_name, "Ana");
        assert!(!ctrl.can_submit());

        assert!(matches!(
            ctrl.begin_submit(),
            Err(CheckoutError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_begin_submit_rejects_incomplete_draft() {
        let mut ctrl = filled_controller();
        ctrl.set_customer_name("");
        assert!(matches!(
            ctrl.begin_submit(),
            Err(CheckoutError::IncompleteDraft)
        ));
        assert!(!ctrl.submit_in_flight());
    }

    #[test]
    fn test_finish_submit_success_resets_session() {
        let mut ctrl = filled_controller();
        ctrl.proceed_to_checkout().unwrap();
        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(500, 0.10, 50.0));
        ctrl.set_redeem_points(true);

        ctrl.begin_submit().unwrap();
        ctrl.finish_submit(true);

        assert!(ctrl.cart().is_empty());
        assert_eq!(ctrl.view(), CheckoutView::Cart);
        assert_eq!(ctrl.draft().customer_name, "");
        assert!(!ctrl.draft().redeem_points);
        assert!(ctrl.balance().is_none());
    }

    #[test]
    fn test_finish_submit_failure_preserves_state() {
        let mut ctrl = filled_controller();
        ctrl.proceed_to_checkout().unwrap();

        ctrl.begin_submit().unwrap();
        ctrl.finish_submit(false);

        assert_eq!(ctrl.cart().item_count(), 1);
        assert_eq!(ctrl.view(), CheckoutView::Checkout);
        assert_eq!(ctrl.draft().customer_name, "Ana");
        assert!(ctrl.can_submit());
    }

    #[test]
    fn test_request_id_reused_across_retries() {
        let mut ctrl = filled_controller();

        let first = ctrl.begin_submit().unwrap();
        ctrl.finish_submit(false);
        let retry = ctrl.begin_submit().unwrap();
        assert_eq!(first.client_request_id, retry.client_request_id);

        ctrl.finish_submit(true);
        ctrl.add_item(&item("b", 2.0));
        ctrl.set_customer_name("Ana");
        ctrl.set_customer_phone("612345678");
        ctrl.set_order_type(OrderType::Takeaway);
        let next = ctrl.begin_submit().unwrap();
        assert_ne!(first.client_request_id, next.client_request_id);
    }

    #[test]
    fn test_payload_totals_are_pre_discount() {
        let mut ctrl = filled_controller();
        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(2000, 0.10, 200.0));
        ctrl.set_redeem_points(true);

        let payload = ctrl.begin_submit().unwrap();

        // total stays gross; the remote side applies the discount for the
        // points it is told to debit
        assert_eq!(payload.subtotal, 100.0);
        assert_eq!(payload.vat, 15.0);
        assert_eq!(payload.total, 115.0);
        assert_eq!(payload.redeemed_points, 1150);
    }

    #[test]
    fn test_takeaway_payload_sends_empty_address() {
        let mut ctrl = filled_controller();
        ctrl.set_customer_address("left over from a delivery attempt");
        ctrl.set_order_type(OrderType::Takeaway);

        let payload = ctrl.begin_submit().unwrap();
        assert_eq!(payload.customer_address, "");
    }

    #[test]
    fn test_reset_after_close_clears_everything_but_cart() {
        let mut ctrl = filled_controller();
        ctrl.proceed_to_checkout().unwrap();
        let (generation, _) = ctrl.begin_lookup().unwrap();
        ctrl.apply_lookup(generation, balance(500, 0.10, 50.0));
        ctrl.set_redeem_points(true);

        ctrl.reset_after_close();

        assert_eq!(ctrl.view(), CheckoutView::Cart);
        assert_eq!(ctrl.draft().customer_name, "");
        assert!(!ctrl.draft().redeem_points);
        assert!(ctrl.balance().is_none());
        // The cart itself survives a surface close; only checkout state resets
        assert_eq!(ctrl.cart().item_count(), 1);
    }
}
