//! Execution record repository trait.

use async_trait::async_trait;

use super::executions_model::{ExecutionRecord, NewExecutionRecord};
use crate::errors::Result;

/// Append-only store for execution records.
#[async_trait]
pub trait ExecutionRepositoryTrait: Send + Sync {
    /// Appends a new record.
    async fn create(&self, record: NewExecutionRecord) -> Result<ExecutionRecord>;

    /// Backfills the holding reference of an executed record.
    async fn attach_holding(&self, execution_id: &str, holding_id: &str)
        -> Result<ExecutionRecord>;

    /// Lists a user's records, newest first, optionally for a single SIP.
    fn list(&self, user_id: &str, sip_id: Option<&str>) -> Result<Vec<ExecutionRecord>>;
}
