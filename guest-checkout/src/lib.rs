//! Guest ordering cart and loyalty-redemption checkout engine
//!
//! The one computational subsystem behind a public-facing digital menu:
//! client-side cart state, loyalty balance resolution, the discount/points
//! calculation, the two-stage checkout state machine, and the order
//! submission protocol.
//!
//! # Module structure
//!
//! ```text
//! guest-checkout/src/
//! ├── cart.rs        # Session-scoped cart store
//! ├── pricing.rs     # VAT + loyalty discount calculation (pure)
//! ├── loyalty.rs     # Loyalty ledger client (resolver trait + HTTP impl)
//! ├── checkout/      # Flow controller (sync core) + async session shell
//! ├── gateway.rs     # Order submission gateway (trait + HTTP impl)
//! ├── config.rs      # Environment-backed configuration
//! └── error.rs       # Error taxonomy (all recoverable)
//! ```
//!
//! # Data flow
//!
//! Cart store → discount calculator ← loyalty resolver → flow controller →
//! submission gateway → (on success) cart clear + session reset.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod loyalty;
pub mod pricing;

// Re-export public types
pub use cart::CartStore;
pub use checkout::session::CheckoutSession;
pub use checkout::{CheckoutController, CheckoutView};
pub use config::EngineConfig;
pub use error::CheckoutError;
pub use gateway::{GatewayError, HttpOrderGateway, OrderGateway, PAYMENT_METHOD};
pub use loyalty::{HttpLoyaltyResolver, LoyaltyResolver, MIN_PHONE_LEN, ResolverError};
pub use pricing::VAT_RATE;

use std::sync::Arc;

/// Build a checkout session wired to the HTTP resolver and gateway from
/// `config`
pub fn session_from_config(config: &EngineConfig) -> reqwest::Result<CheckoutSession> {
    let client = config.http_client()?;
    let resolver = HttpLoyaltyResolver::new(client.clone(), config.api_base_url.clone());
    let gateway = HttpOrderGateway::new(client, config.api_base_url.clone());
    Ok(CheckoutSession::new(
        Arc::new(resolver),
        Arc::new(gateway),
        config.close_reset_grace(),
    ))
}
