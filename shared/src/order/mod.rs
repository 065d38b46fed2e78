//! Wire types for the order-creation remote procedure
//!
//! The remote side owns persistence, stock deduction, and the loyalty ledger
//! debit; this engine only assembles the payload and interprets the response.

use serde::{Deserialize, Serialize};

use crate::models::OrderType;

/// Flat per-line item breakdown sent with the order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuestOrderItem {
    pub id: String,
    /// Resolved display name (primary locale)
    pub name: String,
    pub quantity: i32,
    /// Unit price
    pub price: f64,
    pub line_total: f64,
    /// Per-line notes; the guest cart has no per-line note input, so this is
    /// empty on the guest path
    #[serde(default)]
    pub notes: String,
}

/// Order-creation request payload.
///
/// `total` is the gross total **before** the loyalty discount; the remote
/// side applies the discount for the points it is told to debit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestOrderPayload {
    pub customer_name: String,
    pub customer_phone: String,
    /// Empty string for takeaway orders
    pub customer_address: String,
    pub order_type: OrderType,
    pub payment_method: String,
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
    pub items: Vec<GuestOrderItem>,
    pub notes: String,
    pub redeemed_points: i64,
    /// Client-generated idempotency key; lets the remote side deduplicate a
    /// retried submission
    pub client_request_id: String,
}

/// Opaque receipt returned on successful order creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Error body shape returned by the remote procedures.
///
/// Tolerates both `{ "message": … }` and `{ "error": … }` payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteErrorBody {
    /// The message to show the guest, if the remote supplied one
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}
