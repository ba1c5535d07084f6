//! SIP domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{SipExecutionError, ValidationError};
use crate::executions::{ExecutionRecord, ExecutionStatus};
use crate::{Error, Result};

/// How often a SIP purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SipFrequency {
    Monthly,
    Quarterly,
}

impl SipFrequency {
    /// Calendar months between two runs.
    pub fn months(&self) -> u32 {
        match self {
            SipFrequency::Monthly => 1,
            SipFrequency::Quarterly => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SipFrequency::Monthly => "monthly",
            SipFrequency::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for SipFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SipFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(SipFrequency::Monthly),
            "quarterly" => Ok(SipFrequency::Quarterly),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unsupported SIP frequency '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a recurring purchase instruction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sip {
    pub id: String,
    pub user_id: String,
    pub trading_symbol: String,
    pub scheme_name: String,
    /// Contribution per run
    pub amount: Decimal,
    pub frequency: SipFrequency,
    pub start_date: NaiveDate,
    pub next_execution_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sip {
    /// True when the scanner should pick this SIP up on `as_of`.
    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        self.active && self.next_execution_date <= as_of
    }

    /// Checks the fields execution depends on.
    ///
    /// Stored SIPs are validated at creation, so a failure here means the
    /// record was corrupted or written by something else.
    pub fn validate_for_execution(&self) -> std::result::Result<(), SipExecutionError> {
        if self.amount <= Decimal::ZERO {
            return Err(SipExecutionError::Configuration(format!(
                "SIP {} has non-positive amount {}",
                self.id, self.amount
            )));
        }
        if self.trading_symbol.trim().is_empty() {
            return Err(SipExecutionError::Configuration(format!(
                "SIP {} has no trading symbol",
                self.id
            )));
        }
        Ok(())
    }
}

fn default_active() -> bool {
    true
}

/// Input model for creating a new SIP.
///
/// The next execution date is not part of the input; it is seeded one
/// period after `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub trading_symbol: String,
    pub scheme_name: String,
    pub amount: Decimal,
    pub frequency: SipFrequency,
    pub start_date: NaiveDate,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl NewSip {
    /// Validates the new SIP data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.trading_symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "tradingSymbol".to_string(),
            )));
        }
        if self.scheme_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "schemeName".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "SIP amount must be positive, got {}",
                self.amount
            ))));
        }
        Ok(())
    }
}

/// A stored SIP row that could not be decoded into a [`Sip`].
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedSip {
    pub id: String,
    pub user_id: String,
    pub scheme_name: String,
    pub reason: String,
}

impl fmt::Display for MalformedSip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP {}: {}", self.id, self.reason)
    }
}

/// One entry of the due-SIP scan: either a usable SIP or a row that failed
/// to decode. Malformed rows are reported as per-SIP failures.
pub type DueSip = std::result::Result<Sip, MalformedSip>;

/// Per-SIP line of a batch report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchDetail {
    pub sip_id: String,
    pub scheme: String,
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate outcome of one `run_pending` invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Business date due SIPs were compared against
    pub as_of: NaiveDate,
    pub executed: usize,
    pub failed: usize,
    pub details: Vec<BatchDetail>,
}

impl BatchReport {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            executed: 0,
            failed: 0,
            details: Vec::new(),
        }
    }

    pub fn record_success(&mut self, sip: &Sip, execution: ExecutionRecord) {
        self.executed += 1;
        self.details.push(BatchDetail {
            sip_id: sip.id.clone(),
            scheme: sip.scheme_name.clone(),
            status: ExecutionStatus::Executed,
            execution: Some(execution),
            error: None,
        });
    }

    pub fn record_failure(&mut self, sip_id: &str, scheme: &str, error: String) {
        self.failed += 1;
        self.details.push(BatchDetail {
            sip_id: sip_id.to_string(),
            scheme: scheme.to_string(),
            status: ExecutionStatus::Failed,
            execution: None,
            error: Some(error),
        });
    }

    pub fn total(&self) -> usize {
        self.executed + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
