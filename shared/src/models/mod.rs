//! Data models for the guest ordering engine

mod cart;
mod checkout;
mod loyalty;

pub use cart::{CartLine, LocalizedName, MenuItemInfo};
pub use checkout::{CheckoutDraft, DiscountResult, OrderType};
pub use loyalty::LoyaltyBalance;
