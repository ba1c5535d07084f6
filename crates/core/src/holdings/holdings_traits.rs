//! Holding repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::holdings_model::{Holding, NewHolding};
use crate::errors::Result;

/// Trait defining the contract for Holding repository operations.
///
/// Implementations must reject a second holding for the same
/// (user, trading symbol) pair.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Finds the holding for a user and trading symbol, if any.
    fn find_by_symbol(&self, user_id: &str, trading_symbol: &str) -> Result<Option<Holding>>;

    /// Lists all holdings owned by a user.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Holding>>;

    /// Creates a new holding.
    async fn create(&self, new_holding: NewHolding) -> Result<Holding>;

    /// Overwrites quantity and average price after a merge.
    async fn update_position(
        &self,
        holding_id: &str,
        quantity: Decimal,
        average_price: Decimal,
    ) -> Result<Holding>;
}

/// Read-side service for holdings.
#[async_trait]
pub trait HoldingServiceTrait: Send + Sync {
    fn get_holdings(&self, user_id: &str) -> Result<Vec<Holding>>;

    fn get_holding(&self, user_id: &str, trading_symbol: &str) -> Result<Option<Holding>>;
}
