//! Order submission gateway
//!
//! Maps the finalized draft + cart + discount into the order-creation remote
//! call. The remote side owns persistence, stock deduction, and the loyalty
//! debit; on our side success clears the session and failure leaves every
//! piece of local state untouched so the guest can retry.

use async_trait::async_trait;
use shared::models::{CheckoutDraft, DiscountResult, OrderType};
use shared::order::{GuestOrderItem, GuestOrderPayload, OrderReceipt, RemoteErrorBody};
use thiserror::Error;

use crate::cart::CartStore;
use crate::pricing;

/// Payment method on the guest path is fixed; guests settle on handover.
pub const PAYMENT_METHOD: &str = "CASH";

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("order submission failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote rejection carrying the ledger's message verbatim
    #[error("{0}")]
    Rejected(String),
}

impl GatewayError {
    /// Message safe to show the guest: the remote message where available,
    /// otherwise a generic fallback
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            _ => "Could not submit your order. Please try again.".to_string(),
        }
    }
}

/// Remote order-creation procedure
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn submit_order(&self, order: &GuestOrderPayload) -> Result<OrderReceipt, GatewayError>;
}

/// Assemble the order-creation payload.
///
/// `total` is the gross total pre-discount; the remote side applies the
/// redeemed-points discount itself.
pub fn build_order_payload(
    draft: &CheckoutDraft,
    cart: &CartStore,
    discount: &DiscountResult,
    client_request_id: String,
) -> GuestOrderPayload {
    let items = cart
        .lines()
        .iter()
        .map(|line| GuestOrderItem {
            id: line.item_id.clone(),
            name: line.name.primary.clone(),
            quantity: line.quantity,
            price: line.unit_price,
            line_total: line.line_total(),
            notes: String::new(),
        })
        .collect();

    let subtotal = cart.subtotal();
    let address = if draft.order_type == OrderType::Delivery {
        draft.customer_address.clone()
    } else {
        String::new()
    };

    GuestOrderPayload {
        customer_name: draft.customer_name.clone(),
        customer_phone: draft.customer_phone.clone(),
        customer_address: address,
        order_type: draft.order_type,
        payment_method: PAYMENT_METHOD.to_string(),
        subtotal,
        vat: pricing::vat(subtotal),
        total: pricing::gross_total(subtotal),
        items,
        notes: draft.notes.clone(),
        redeemed_points: discount.points_to_redeem,
        client_request_id,
    }
}

/// HTTP-backed gateway
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit_order(&self, order: &GuestOrderPayload) -> Result<OrderReceipt, GatewayError> {
        let url = format!("{}/orders", self.base_url);
        let response = self.client.post(&url).json(order).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: RemoteErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .into_message()
                .unwrap_or_else(|| format!("order service returned {status}"));
            return Err(GatewayError::Rejected(message));
        }

        Ok(response.json::<OrderReceipt>().await?)
    }
}
