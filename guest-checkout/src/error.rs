//! Engine errors
//!
//! Every failure surfaced here is local and recoverable: nothing corrupts
//! the cart or the checkout draft, and the guest can always retry.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::loyalty::ResolverError;

/// Checkout flow errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout form is incomplete")]
    IncompleteDraft,

    #[error("an order submission is already in flight")]
    SubmissionInFlight,

    #[error(transparent)]
    Lookup(#[from] ResolverError),

    #[error(transparent)]
    Submission(#[from] GatewayError),
}

impl CheckoutError {
    /// Message safe to show the guest
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Submission(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
