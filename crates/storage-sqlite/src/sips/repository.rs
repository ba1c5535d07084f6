use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::warn;
use std::sync::Arc;
use uuid::Uuid;

use sipledger_core::errors::{DatabaseError, Error};
use sipledger_core::sips::{DueSip, NewSip, Sip, SipRepositoryTrait};
use sipledger_core::Result;

use super::model::SipDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::sips;
use crate::utils::{format_date, format_timestamp};

pub struct SipRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SipRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SipRepository { pool, writer }
    }

    // Read paths other than the due scan treat a corrupt row as a hard error.
    fn decode(row: SipDB) -> Result<Sip> {
        Sip::try_from(row).map_err(|m| Error::Database(DatabaseError::Internal(m.to_string())))
    }
}

#[async_trait]
impl SipRepositoryTrait for SipRepository {
    async fn create(&self, new_sip: NewSip, next_execution_date: NaiveDate) -> Result<Sip> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Sip> {
                let id = new_sip
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = SipDB::from_new(id, new_sip, next_execution_date, Utc::now());

                let inserted = diesel::insert_into(sips::table)
                    .values(&row)
                    .returning(SipDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Self::decode(inserted)
            })
            .await
    }

    fn get_by_id(&self, sip_id: &str) -> Result<Sip> {
        let mut conn = get_connection(&self.pool)?;
        let row = sips::table
            .find(sip_id)
            .select(SipDB::as_select())
            .first::<SipDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("SIP {}", sip_id))))?;
        Self::decode(row)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Sip>> {
        let mut conn = get_connection(&self.pool)?;
        sips::table
            .filter(sips::user_id.eq(user_id))
            .order((sips::next_execution_date.asc(), sips::id.asc()))
            .select(SipDB::as_select())
            .load::<SipDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    fn find_due(&self, as_of: NaiveDate) -> Result<Vec<DueSip>> {
        let mut conn = get_connection(&self.pool)?;
        // ISO dates compare correctly as TEXT.
        let rows = sips::table
            .filter(sips::active.eq(true))
            .filter(sips::next_execution_date.le(format_date(as_of)))
            .order((sips::next_execution_date.asc(), sips::id.asc()))
            .select(SipDB::as_select())
            .load::<SipDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                Sip::try_from(row).inspect_err(|m| warn!("Undecodable SIP row {}", m))
            })
            .collect())
    }

    async fn update_next_execution_date(
        &self,
        sip_id: &str,
        next_execution_date: NaiveDate,
    ) -> Result<Sip> {
        let sip_id = sip_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Sip> {
                let updated = diesel::update(sips::table.find(&sip_id))
                    .set((
                        sips::next_execution_date.eq(format_date(next_execution_date)),
                        sips::updated_at.eq(format_timestamp(Utc::now())),
                    ))
                    .returning(SipDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!("SIP {}", sip_id)))
                    })?;
                Self::decode(updated)
            })
            .await
    }
}
