//! Loyalty ledger client
//!
//! Resolves a phone number to its redeemable balance. Lookups run only on
//! explicit user request (not per keystroke) and are never auto-retried; a
//! failed lookup simply means no balance is available.

use async_trait::async_trait;
use serde::Serialize;
use shared::models::LoyaltyBalance;
use shared::order::RemoteErrorBody;
use thiserror::Error;

/// Minimum phone length before a lookup is worth attempting.
/// Below this the balance is considered stale and redemption is disabled.
pub const MIN_PHONE_LEN: usize = 8;

/// Resolver errors
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("loyalty lookup failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Remote(String),
}

/// Remote loyalty-ledger lookup
#[async_trait]
pub trait LoyaltyResolver: Send + Sync {
    /// Resolve `phone` against the ledger.
    ///
    /// The caller guarantees `phone.len() >= MIN_PHONE_LEN`; the short-phone
    /// case is a precondition handled upstream, not an error here.
    async fn resolve(&self, phone: &str) -> Result<LoyaltyBalance, ResolverError>;
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    phone: &'a str,
}

/// HTTP-backed resolver
#[derive(Debug, Clone)]
pub struct HttpLoyaltyResolver {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLoyaltyResolver {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LoyaltyResolver for HttpLoyaltyResolver {
    async fn resolve(&self, phone: &str) -> Result<LoyaltyBalance, ResolverError> {
        let url = format!("{}/loyalty/balance", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LookupRequest { phone })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: RemoteErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .into_message()
                .unwrap_or_else(|| format!("loyalty ledger returned {status}"));
            return Err(ResolverError::Remote(message));
        }

        Ok(response.json::<LoyaltyBalance>().await?)
    }
}
