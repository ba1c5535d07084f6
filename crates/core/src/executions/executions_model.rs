//! Execution record domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::sips::Sip;
use crate::{Error, Result};

/// Outcome of one SIP execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Executed,
    Failed,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Executed => "executed",
            ExecutionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "executed" => Ok(ExecutionStatus::Executed),
            "failed" => Ok(ExecutionStatus::Failed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown execution status '{}'",
                other
            )))),
        }
    }
}

/// Immutable audit entry for one attempted SIP run.
///
/// `error` is set iff the run failed; `holding_id` is only ever set on an
/// executed run, once the holding step has completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    pub id: String,
    pub user_id: String,
    pub sip_id: String,
    pub executed_at: DateTime<Utc>,
    pub amount: Decimal,
    pub nav: Decimal,
    pub units: Decimal,
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holding_id: Option<String>,
}

impl ExecutionRecord {
    pub fn is_executed(&self) -> bool {
        self.status == ExecutionStatus::Executed
    }
}

/// Input model for appending an execution record.
///
/// Build it with [`NewExecutionRecord::executed`] or
/// [`NewExecutionRecord::failed`] so status, NAV, units and error agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExecutionRecord {
    pub user_id: String,
    pub sip_id: String,
    pub executed_at: DateTime<Utc>,
    pub amount: Decimal,
    pub nav: Decimal,
    pub units: Decimal,
    pub status: ExecutionStatus,
    pub error: Option<String>,
}

impl NewExecutionRecord {
    pub fn executed(sip: &Sip, nav: Decimal, units: Decimal, executed_at: DateTime<Utc>) -> Self {
        Self {
            user_id: sip.user_id.clone(),
            sip_id: sip.id.clone(),
            executed_at,
            amount: sip.amount,
            nav,
            units,
            status: ExecutionStatus::Executed,
            error: None,
        }
    }

    pub fn failed(sip: &Sip, message: impl Into<String>, executed_at: DateTime<Utc>) -> Self {
        Self {
            user_id: sip.user_id.clone(),
            sip_id: sip.id.clone(),
            executed_at,
            amount: sip.amount,
            nav: Decimal::ZERO,
            units: Decimal::ZERO,
            status: ExecutionStatus::Failed,
            error: Some(message.into()),
        }
    }
}
