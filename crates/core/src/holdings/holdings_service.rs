use std::sync::Arc;

use super::holdings_model::Holding;
use super::holdings_traits::{HoldingRepositoryTrait, HoldingServiceTrait};
use crate::errors::Result;

/// Service for reading holdings
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
}

impl HoldingService {
    pub fn new(repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl HoldingServiceTrait for HoldingService {
    fn get_holdings(&self, user_id: &str) -> Result<Vec<Holding>> {
        self.repository.list_for_user(user_id)
    }

    fn get_holding(&self, user_id: &str, trading_symbol: &str) -> Result<Option<Holding>> {
        self.repository.find_by_symbol(user_id, trading_symbol)
    }
}
