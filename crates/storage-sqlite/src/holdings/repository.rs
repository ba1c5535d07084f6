use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use sipledger_core::errors::{DatabaseError, Error};
use sipledger_core::holdings::{Holding, HoldingRepositoryTrait, NewHolding};
use sipledger_core::Result;

use super::model::HoldingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::holdings;
use crate::utils::{format_decimal, format_timestamp};

pub struct HoldingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        HoldingRepository { pool, writer }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    fn find_by_symbol(&self, user_id: &str, trading_symbol: &str) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        holdings::table
            .filter(holdings::user_id.eq(user_id))
            .filter(holdings::trading_symbol.eq(trading_symbol))
            .select(HoldingDB::as_select())
            .first::<HoldingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Holding::try_from)
            .transpose()
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        holdings::table
            .filter(holdings::user_id.eq(user_id))
            .order(holdings::trading_symbol.asc())
            .select(HoldingDB::as_select())
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Holding::try_from)
            .collect()
    }

    async fn create(&self, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let id = new_holding
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = HoldingDB::from_new(id, new_holding, Utc::now());

                let inserted = diesel::insert_into(holdings::table)
                    .values(&row)
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Holding::try_from(inserted)
            })
            .await
    }

    async fn update_position(
        &self,
        holding_id: &str,
        quantity: Decimal,
        average_price: Decimal,
    ) -> Result<Holding> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let updated = diesel::update(holdings::table.find(&holding_id))
                    .set((
                        holdings::quantity.eq(format_decimal(quantity)),
                        holdings::average_price.eq(format_decimal(average_price)),
                        holdings::updated_at.eq(format_timestamp(Utc::now())),
                    ))
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Holding {}",
                            holding_id
                        )))
                    })?;
                Holding::try_from(updated)
            })
            .await
    }
}
