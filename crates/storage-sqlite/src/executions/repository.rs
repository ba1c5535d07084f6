use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use sipledger_core::errors::{DatabaseError, Error};
use sipledger_core::executions::{ExecutionRecord, ExecutionRepositoryTrait, NewExecutionRecord};
use sipledger_core::Result;

use super::model::ExecutionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::sip_executions;

/// Append-only execution log. Rows are never deleted; the only update is
/// linking an executed row to its holding.
pub struct ExecutionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExecutionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExecutionRepository { pool, writer }
    }
}

#[async_trait]
impl ExecutionRepositoryTrait for ExecutionRepository {
    async fn create(&self, record: NewExecutionRecord) -> Result<ExecutionRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExecutionRecord> {
                let row = ExecutionDB::from_new(Uuid::new_v4().to_string(), record);
                let inserted = diesel::insert_into(sip_executions::table)
                    .values(&row)
                    .returning(ExecutionDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                ExecutionRecord::try_from(inserted)
            })
            .await
    }

    async fn attach_holding(
        &self,
        execution_id: &str,
        holding_id: &str,
    ) -> Result<ExecutionRecord> {
        let execution_id = execution_id.to_string();
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExecutionRecord> {
                let updated = diesel::update(
                    sip_executions::table
                        .find(&execution_id)
                        .filter(sip_executions::status.eq("executed")),
                )
                .set(sip_executions::holding_id.eq(Some(holding_id)))
                .returning(ExecutionDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!(
                        "Executed record {}",
                        execution_id
                    )))
                })?;
                ExecutionRecord::try_from(updated)
            })
            .await
    }

    fn list(&self, user_id: &str, sip_id: Option<&str>) -> Result<Vec<ExecutionRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = sip_executions::table
            .filter(sip_executions::user_id.eq(user_id))
            .order((sip_executions::executed_at.desc(), sip_executions::id.desc()))
            .into_boxed();
        if let Some(sip_id) = sip_id {
            query = query.filter(sip_executions::sip_id.eq(sip_id));
        }

        query
            .load::<ExecutionDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(ExecutionRecord::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sips::SipRepository;
    use crate::test_utils::setup_db;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use sipledger_core::executions::ExecutionStatus;
    use sipledger_core::sips::{NewSip, Sip, SipFrequency, SipRepositoryTrait};

    async fn seed_sip(repo: &SipRepository, id: &str) -> Sip {
        repo.create(
            NewSip {
                id: Some(id.to_string()),
                user_id: "user-1".to_string(),
                trading_symbol: "INF846K01DP8".to_string(),
                scheme_name: "Axis Bluechip Fund".to_string(),
                amount: dec!(5000),
                frequency: SipFrequency::Monthly,
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                active: true,
            },
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn records_round_trip_and_list_newest_first() {
        let (pool, writer, _dir) = setup_db();
        let sips = SipRepository::new(pool.clone(), writer.clone());
        let repo = ExecutionRepository::new(pool, writer);
        let sip_a = seed_sip(&sips, "sip-a").await;
        let sip_b = seed_sip(&sips, "sip-b").await;

        let at = Utc.with_ymd_and_hms(2024, 2, 1, 6, 30, 0).unwrap();
        let first = repo
            .create(NewExecutionRecord::executed(&sip_a, dec!(50), dec!(100), at))
            .await
            .unwrap();
        repo.create(NewExecutionRecord::failed(
            &sip_b,
            "Price not found for INF846K01DP8",
            at + Duration::minutes(1),
        ))
        .await
        .unwrap();
        let latest = repo
            .create(NewExecutionRecord::executed(
                &sip_a,
                dec!(40),
                dec!(125),
                at + Duration::days(29),
            ))
            .await
            .unwrap();

        let all = repo.list("user-1", None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, latest.id);
        assert_eq!(all[2].id, first.id);
        assert_eq!(all[1].status, ExecutionStatus::Failed);
        assert_eq!(all[1].units, dec!(0));

        let only_a = repo.list("user-1", Some("sip-a")).unwrap();
        assert_eq!(only_a.len(), 2);
        assert!(only_a.iter().all(|r| r.sip_id == "sip-a"));
        assert!(repo.list("user-2", None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn holding_can_only_be_attached_to_executed_records() {
        let (pool, writer, _dir) = setup_db();
        let sips = SipRepository::new(pool.clone(), writer.clone());
        let holdings = crate::holdings::HoldingRepository::new(pool.clone(), writer.clone());
        let repo = ExecutionRepository::new(pool, writer);
        let sip = seed_sip(&sips, "sip-a").await;
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 6, 30, 0).unwrap();

        let holding = sipledger_core::holdings::HoldingRepositoryTrait::create(
            &holdings,
            sipledger_core::holdings::NewHolding {
                id: Some("holding-1".to_string()),
                user_id: "user-1".to_string(),
                trading_symbol: "INF846K01DP8".to_string(),
                amc: "Axis Mutual Fund".to_string(),
                scheme_name: "Axis Bluechip Fund".to_string(),
                scheme_type: "Equity".to_string(),
                plan: "Direct".to_string(),
                quantity: dec!(100),
                average_price: dec!(50),
                purchase_date: at,
                origin_note: "SIP Auto-execution".to_string(),
            },
        )
        .await
        .unwrap();

        let executed = repo
            .create(NewExecutionRecord::executed(&sip, dec!(50), dec!(100), at))
            .await
            .unwrap();
        let linked = repo.attach_holding(&executed.id, &holding.id).await.unwrap();
        assert_eq!(linked.holding_id.as_deref(), Some("holding-1"));

        let failed = repo
            .create(NewExecutionRecord::failed(&sip, "boom", at))
            .await
            .unwrap();
        let err = repo
            .attach_holding(&failed.id, &holding.id)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
