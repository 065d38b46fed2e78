//! Cart models

use serde::{Deserialize, Serialize};

use crate::money;

/// Localized display name, resolved by the menu-browsing surface.
///
/// The engine never performs language selection itself; both locales are
/// carried through untouched and the primary one goes on the order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub primary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl LocalizedName {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
        }
    }

    pub fn with_secondary(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: Some(secondary.into()),
        }
    }
}

/// Menu item metadata supplied by the caller when adding to the cart.
///
/// The engine never looks item data up itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemInfo {
    pub id: String,
    pub name: LocalizedName,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

/// One distinct menu item in the guest cart.
///
/// At most one line exists per `item_id`; re-adding the same item increments
/// `quantity` instead of appending a duplicate line. A line with quantity 0
/// is invalid and must be removed, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub name: LocalizedName,
    pub unit_price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CartLine {
    /// unit_price * quantity, computed with decimal precision
    pub fn line_total(&self) -> f64 {
        money::line_total(self.unit_price, self.quantity)
    }
}
