//! SQLite storage implementation for the SIP ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `sipledger-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for SIPs, holdings, executions and prices
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod executions;
pub mod holdings;
pub mod pricing;
pub mod schema;
pub mod sips;
mod utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, write_actor::spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from sipledger-core for convenience
pub use sipledger_core::errors::{DatabaseError, Error, Result};

#[cfg(test)]
pub(crate) mod test_utils;
