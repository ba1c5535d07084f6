use async_trait::async_trait;

use super::pricing_model::PriceQuote;
use crate::errors::Result;

/// Read-only NAV lookup by trading symbol.
///
/// `Ok(None)` means the symbol is unknown to the feed. `Err` is reserved for
/// the feed itself being unreachable.
#[async_trait]
pub trait PriceProviderTrait: Send + Sync {
    async fn get_price(&self, trading_symbol: &str) -> Result<Option<PriceQuote>>;
}
