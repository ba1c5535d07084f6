//! SIP Ledger Core - Domain entities, services, and traits.
//!
//! This crate contains the SIP execution engine: schedule advancement,
//! cost basis accounting, single-SIP execution and the due-SIP batch.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod executions;
pub mod holdings;
pub mod pricing;
pub mod sips;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
