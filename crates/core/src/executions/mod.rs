//! Executions module - the append-only audit trail of SIP runs.

mod executions_model;
mod executions_traits;

#[cfg(test)]
mod executions_model_tests;

pub use executions_model::{ExecutionRecord, ExecutionStatus, NewExecutionRecord};
pub use executions_traits::ExecutionRepositoryTrait;
