//! SQLite storage implementation for SIPs.

mod model;
mod repository;

pub use model::SipDB;
pub use repository::SipRepository;
