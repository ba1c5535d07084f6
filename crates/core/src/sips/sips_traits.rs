//! SIP repository and service traits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::sips_model::{BatchReport, DueSip, NewSip, Sip};
use crate::errors::Result;
use crate::executions::ExecutionRecord;

/// Trait defining the contract for SIP repository operations.
#[async_trait]
pub trait SipRepositoryTrait: Send + Sync {
    /// Persists a new SIP with its seeded next execution date.
    async fn create(&self, new_sip: NewSip, next_execution_date: NaiveDate) -> Result<Sip>;

    /// Retrieves a SIP by its ID.
    fn get_by_id(&self, sip_id: &str) -> Result<Sip>;

    /// Lists a user's SIPs ordered by next execution date.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Sip>>;

    /// Returns every active SIP with `next_execution_date <= as_of`, ordered
    /// by next execution date.
    ///
    /// Rows that cannot be decoded are returned as `Err(MalformedSip)`
    /// instead of failing the whole scan.
    fn find_due(&self, as_of: NaiveDate) -> Result<Vec<DueSip>>;

    /// Moves the SIP's schedule forward.
    async fn update_next_execution_date(
        &self,
        sip_id: &str,
        next_execution_date: NaiveDate,
    ) -> Result<Sip>;
}

/// Trait defining the contract for SIP service operations.
#[async_trait]
pub trait SipServiceTrait: Send + Sync {
    /// Validates and creates a SIP, seeding its first run one period after
    /// the start date.
    async fn create_sip(&self, new_sip: NewSip) -> Result<Sip>;

    /// Retrieves a SIP by ID.
    fn get_sip(&self, sip_id: &str) -> Result<Sip>;

    /// Lists a user's SIPs.
    fn list_sips(&self, user_id: &str) -> Result<Vec<Sip>>;

    /// Execution history for a user, newest first, optionally for one SIP.
    fn get_executions(&self, user_id: &str, sip_id: Option<&str>) -> Result<Vec<ExecutionRecord>>;

    /// Executes every SIP due on the business date of `now`.
    ///
    /// Individual SIP failures are reported in the returned [`BatchReport`];
    /// only a failure to query the due SIPs is returned as an error.
    async fn run_pending(&self, now: DateTime<Utc>) -> Result<BatchReport>;
}
