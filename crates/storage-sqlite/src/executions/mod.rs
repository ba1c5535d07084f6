//! SQLite storage implementation for SIP execution records.

mod model;
mod repository;

pub use model::ExecutionDB;
pub use repository::ExecutionRepository;
