//! Database models for execution records.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use sipledger_core::errors::{DatabaseError, Error};
use sipledger_core::executions::{ExecutionRecord, ExecutionStatus, NewExecutionRecord};

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};

/// Database model for execution records
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::sip_executions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDB {
    pub id: String,
    pub user_id: String,
    pub sip_id: String,
    pub executed_at: String,
    pub amount: String,
    pub nav: String,
    pub units: String,
    pub status: String,
    pub error: Option<String>,
    pub holding_id: Option<String>,
}

impl ExecutionDB {
    pub fn from_new(id: String, record: NewExecutionRecord) -> Self {
        Self {
            id,
            user_id: record.user_id,
            sip_id: record.sip_id,
            executed_at: format_timestamp(record.executed_at),
            amount: format_decimal(record.amount),
            nav: format_decimal(record.nav),
            units: format_decimal(record.units),
            status: record.status.as_str().to_string(),
            error: record.error,
            holding_id: None,
        }
    }
}

impl TryFrom<ExecutionDB> for ExecutionRecord {
    type Error = Error;

    fn try_from(db: ExecutionDB) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| {
            Error::Database(DatabaseError::Internal(format!(
                "Execution {}: {}",
                db.id, reason
            )))
        };
        let executed_at = parse_timestamp(&db.executed_at, "executed_at").map_err(corrupt)?;
        let amount = parse_decimal(&db.amount, "amount").map_err(corrupt)?;
        let nav = parse_decimal(&db.nav, "nav").map_err(corrupt)?;
        let units = parse_decimal(&db.units, "units").map_err(corrupt)?;
        let status = db.status.parse::<ExecutionStatus>()?;

        Ok(ExecutionRecord {
            id: db.id,
            user_id: db.user_id,
            sip_id: db.sip_id,
            executed_at,
            amount,
            nav,
            units,
            status,
            error: db.error,
            holding_id: db.holding_id,
        })
    }
}
