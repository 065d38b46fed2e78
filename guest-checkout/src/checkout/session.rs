//! Async shell around the checkout controller
//!
//! Owns the remote collaborators (loyalty resolver, order gateway) and the
//! deferred close-reset timer. The controller lock is never held across an
//! await: async operations snapshot their inputs, run the remote call, then
//! reconcile the result against the state as it is *now*.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

use shared::models::LoyaltyBalance;
use shared::order::OrderReceipt;

use super::CheckoutController;
use crate::error::CheckoutError;
use crate::gateway::OrderGateway;
use crate::loyalty::LoyaltyResolver;

/// One guest's checkout session.
///
/// Synchronous state transitions go through [`state`](Self::state); the
/// methods here are the operations that suspend (loyalty lookup, order
/// submission) plus the close/reopen pair that drives the deferred reset.
pub struct CheckoutSession {
    core: Arc<Mutex<CheckoutController>>,
    resolver: Arc<dyn LoyaltyResolver>,
    gateway: Arc<dyn OrderGateway>,
    reset_grace: Duration,
    pending_reset: Mutex<Option<CancellationToken>>,
}

impl CheckoutSession {
    pub fn new(
        resolver: Arc<dyn LoyaltyResolver>,
        gateway: Arc<dyn OrderGateway>,
        reset_grace: Duration,
    ) -> Self {
        Self {
            core: Arc::new(Mutex::new(CheckoutController::new())),
            resolver,
            gateway,
            reset_grace,
            pending_reset: Mutex::new(None),
        }
    }

    /// Direct access to the synchronous controller core.
    ///
    /// Callers must not hold the guard across an await point.
    pub fn state(&self) -> MutexGuard<'_, CheckoutController> {
        self.core.lock()
    }

    /// Resolve the loyalty balance for the phone currently in the form.
    ///
    /// Returns `Ok(None)` when the phone is too short (no lookup attempted)
    /// or when the phone changed while the lookup was in flight (stale
    /// resolution, discarded). Never auto-retries.
    pub async fn lookup_loyalty(&self) -> Result<Option<LoyaltyBalance>, CheckoutError> {
        let Some((generation, phone)) = self.core.lock().begin_lookup() else {
            return Ok(None);
        };

        let result = self.resolver.resolve(&phone).await;

        let mut core = self.core.lock();
        match result {
            Ok(balance) => {
                if core.apply_lookup(generation, balance.clone()) {
                    tracing::debug!(points = balance.points, "loyalty balance resolved");
                    Ok(Some(balance))
                } else {
                    tracing::debug!("discarding stale loyalty resolution");
                    Ok(None)
                }
            }
            Err(e) => {
                if core.fail_lookup(generation) {
                    tracing::warn!(error = %e, "loyalty lookup failed");
                    Err(e.into())
                } else {
                    // Superseded lookup; its failure is nobody's business
                    Ok(None)
                }
            }
        }
    }

    /// Submit the order.
    ///
    /// While a submission is in flight any further attempt is rejected; on
    /// success the cart is cleared and the session returns to the cart view,
    /// on failure every piece of local state is left untouched for a retry.
    pub async fn submit(&self) -> Result<OrderReceipt, CheckoutError> {
        let payload = self.core.lock().begin_submit()?;

        let result = self.gateway.submit_order(&payload).await;

        let mut core = self.core.lock();
        core.finish_submit(result.is_ok());
        match result {
            Ok(receipt) => {
                tracing::info!(
                    order_id = %receipt.order_id,
                    items = payload.items.len(),
                    total = payload.total,
                    "guest order submitted"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "guest order submission failed");
                Err(e.into())
            }
        }
    }

    /// Close the checkout surface.
    ///
    /// The full state reset is scheduled after a grace delay rather than
    /// applied immediately, so a closing transition animation is not
    /// interrupted; a rapid [`reopen`](Self::reopen) cancels the pending
    /// reset instead of racing it. An in-flight submission is not cancelled.
    ///
    /// Must be called within a tokio runtime.
    pub fn close(&self) {
        let token = CancellationToken::new();
        if let Some(previous) = self.pending_reset.lock().replace(token.clone()) {
            previous.cancel();
        }

        let core = Arc::clone(&self.core);
        let grace = self.reset_grace;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(grace) => {
                    core.lock().reset_after_close();
                }
            }
        });
    }

    /// Reopen the surface, cancelling a pending close-reset if one is still
    /// within its grace delay
    pub fn reopen(&self) {
        if let Some(pending) = self.pending_reset.lock().take() {
            pending.cancel();
        }
    }
}
