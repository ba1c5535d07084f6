use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use sipledger_core::pricing::{PriceProviderTrait, PriceQuote};
use sipledger_core::Result;

use super::model::MutualFundPriceDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::mutual_fund_prices;

/// Reads NAVs from the local `mutual_fund_prices` table.
pub struct PriceRepository {
    pool: Arc<DbPool>,
}

impl PriceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        PriceRepository { pool }
    }
}

#[async_trait]
impl PriceProviderTrait for PriceRepository {
    async fn get_price(&self, trading_symbol: &str) -> Result<Option<PriceQuote>> {
        let mut conn = get_connection(&self.pool)?;
        mutual_fund_prices::table
            .find(trading_symbol)
            .select(MutualFundPriceDB::as_select())
            .first::<MutualFundPriceDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(PriceQuote::try_from)
            .transpose()
    }
}
