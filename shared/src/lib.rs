//! Shared types for the guest ordering engine
//!
//! Common types used across the workspace: cart and loyalty models,
//! checkout form state, and the wire payloads exchanged with the
//! remote ordering system.

pub mod models;
pub mod money;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    CartLine, CheckoutDraft, DiscountResult, LocalizedName, LoyaltyBalance, MenuItemInfo,
    OrderType,
};
pub use order::{GuestOrderItem, GuestOrderPayload, OrderReceipt, RemoteErrorBody};
