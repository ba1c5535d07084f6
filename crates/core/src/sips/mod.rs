//! SIPs module - recurring purchase plans and their execution engine.
//!
//! - [`advance_schedule`] computes the next run date of a plan
//! - [`SipExecutor`] runs a single plan against the price feed and ledger
//! - [`SipService`] scans for due plans and runs them as a batch

mod sips_executor;
mod sips_model;
mod sips_schedule;
mod sips_service;
mod sips_traits;



pub use sips_executor::SipExecutor;
pub use sips_model::{
    BatchDetail, BatchReport, DueSip, MalformedSip, NewSip, Sip, SipFrequency,
};
pub use sips_schedule::advance_schedule;
pub use sips_service::SipService;
pub use sips_traits::{SipRepositoryTrait, SipServiceTrait};
